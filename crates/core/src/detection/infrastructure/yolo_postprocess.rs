//! Model-independent pieces of YOLO inference: letterbox preprocessing,
//! output decoding and non-maximum suppression.

use ndarray::Array4;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Letterbox padding value (114/255 gray, the YOLO convention).
const PAD_VALUE: f32 = 114.0 / 255.0;

/// Layout of one YOLO output row after `[cx, cy, w, h]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YoloHead {
    /// One score per class (COCO detection models, person = class 0).
    Detect { num_classes: usize },
    /// A single objectness score followed by keypoints (pose models).
    Pose,
}

/// How a frame was mapped into the square model input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f64,
    pub pad_x: u32,
    pub pad_y: u32,
}

impl Letterbox {
    fn unmap(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.pad_x as f64) / self.scale,
            (y - self.pad_y as f64) / self.scale,
        )
    }
}

/// Which decoded rows are kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionFilter {
    pub confidence: f64,
    /// Only these class ids; `None` keeps every class.
    pub classes: Option<Vec<usize>>,
}

impl DetectionFilter {
    fn accepts(&self, confidence: f64, class_id: usize) -> bool {
        confidence >= self.confidence
            && self
                .classes
                .as_ref()
                .map_or(true, |ids| ids.contains(&class_id))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawDetection {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub confidence: f64,
    pub class_id: usize,
}

impl RawDetection {
    pub fn to_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Resizes (nearest neighbour) and pads a frame into an NCHW float tensor.
pub fn letterbox(frame: &Frame, target_size: u32) -> (Array4<f32>, Letterbox) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = ((fw * scale).round() as u32).min(target_size);
    let new_h = ((fh * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let size = target_size as usize;
    let mut tensor = Array4::<f32>::from_elem((1, 3, size, size), PAD_VALUE);

    let src = frame.as_ndarray();
    let src_w = frame.width() as usize;
    let src_h = frame.height() as usize;

    for y in 0..new_h as usize {
        let sy = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let sx = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[sy, sx, c]] as f32 / 255.0;
            }
        }
    }

    (
        tensor,
        Letterbox {
            scale,
            pad_x,
            pad_y,
        },
    )
}

/// Decodes a `[1, features, anchors]` or `[1, anchors, features]` output.
///
/// The smaller of the two trailing dimensions is taken as the feature axis.
pub fn decode_output(
    data: &[f32],
    shape: &[usize],
    head: YoloHead,
    filter: &DetectionFilter,
    letterbox: &Letterbox,
) -> Result<Vec<RawDetection>, String> {
    if shape.len() != 3 {
        return Err(format!("Unexpected YOLO output shape: {shape:?}"));
    }
    let transposed = shape[1] < shape[2];
    let (num_anchors, num_feats) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if data.len() < num_anchors * num_feats {
        return Err(format!(
            "YOLO output holds {} values, shape {shape:?} needs {}",
            data.len(),
            num_anchors * num_feats
        ));
    }

    let needed = match head {
        YoloHead::Detect { num_classes } => 4 + num_classes.max(1),
        YoloHead::Pose => 5,
    };
    if num_feats < needed {
        return Err(format!(
            "YOLO output has {num_feats} features per row, {head:?} needs {needed}"
        ));
    }

    let feature = |anchor: usize, f: usize| -> f32 {
        if transposed {
            data[f * num_anchors + anchor]
        } else {
            data[anchor * num_feats + f]
        }
    };

    let mut detections = Vec::new();
    for i in 0..num_anchors {
        let (confidence, class_id) = match head {
            YoloHead::Detect { num_classes } => (0..num_classes.max(1))
                .map(|c| (feature(i, 4 + c) as f64, c))
                .fold((f64::NEG_INFINITY, 0), |best, cur| {
                    if cur.0 > best.0 {
                        cur
                    } else {
                        best
                    }
                }),
            YoloHead::Pose => (feature(i, 4) as f64, 0),
        };
        if !filter.accepts(confidence, class_id) {
            continue;
        }

        let cx = feature(i, 0) as f64;
        let cy = feature(i, 1) as f64;
        let w = feature(i, 2) as f64;
        let h = feature(i, 3) as f64;
        let (x1, y1) = letterbox.unmap(cx - w / 2.0, cy - h / 2.0);
        let (x2, y2) = letterbox.unmap(cx + w / 2.0, cy + h / 2.0);

        detections.push(RawDetection {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class_id,
        });
    }
    Ok(detections)
}

/// Greedy class-agnostic NMS on the pixel boxes, highest confidence first.
pub fn nms(dets: &mut [RawDetection], iou_thresh: f64) -> Vec<RawDetection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<(BoundingBox, &RawDetection)> = Vec::new();
    for det in dets.iter() {
        let bbox = det.to_bounding_box();
        if keep.iter().all(|(kept, _)| kept.iou(&bbox) <= iou_thresh) {
            keep.push((bbox, det));
        }
    }
    keep.into_iter().map(|(_, det)| det.clone()).collect()
}
