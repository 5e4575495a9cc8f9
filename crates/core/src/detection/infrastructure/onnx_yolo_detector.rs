use std::path::Path;

use crate::detection::domain::subject_detector::SubjectDetector;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::NMS_IOU_THRESHOLD;
use crate::shared::frame::Frame;

use super::execution_provider::preferred_execution_providers;
use super::yolo_postprocess::{decode_output, letterbox, nms, DetectionFilter, YoloHead};

/// Fallback input resolution when the model's input shape is dynamic.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Settings for [`OnnxYoloDetector`].
#[derive(Clone, Debug, PartialEq)]
pub struct YoloOptions {
    pub head: YoloHead,
    pub filter: DetectionFilter,
}

/// Person/face detector backed by a YOLO model in ONNX Runtime.
///
/// Stateless across frames: tracking is left to the region tracker.
pub struct OnnxYoloDetector {
    session: ort::session::Session,
    options: YoloOptions,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Loads the model. The square input size is read from the NCHW input
    /// shape, falling back to 640 when it is dynamic.
    pub fn new(model_path: &Path, options: YoloOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?
            .with_execution_providers(preferred_execution_providers())?
            .commit_from_file(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| match input.dtype() {
                ort::value::ValueType::Tensor { ref shape, .. } if shape.len() >= 4 && shape[2] > 0 => {
                    Some(shape[2] as u32)
                }
                _ => None,
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        log::info!(
            "Loaded YOLO model {} ({:?}, input {input_size}px, confidence {})",
            model_path.display(),
            options.head,
            options.filter.confidence
        );

        Ok(Self {
            session,
            options,
            input_size,
        })
    }
}

impl SubjectDetector for OnnxYoloDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        let (input_tensor, lb) = letterbox(frame, self.input_size);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        let data = tensor.as_slice().ok_or("YOLO output is not contiguous")?;

        let mut raw = decode_output(data, &shape, self.options.head, &self.options.filter, &lb)?;
        let kept = nms(&mut raw, NMS_IOU_THRESHOLD);

        Ok(kept.iter().map(|d| d.to_bounding_box()).collect())
    }
}
