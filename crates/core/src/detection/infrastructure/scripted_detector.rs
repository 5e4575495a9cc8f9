use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::subject_detector::SubjectDetector;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ScriptLoadError {
    #[error("failed to read detection script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid detection script {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("frame key {0:?} in detection script is not an index")]
    BadKey(String),
}

/// Replays recorded detections by frame index.
///
/// The script is a JSON object mapping frame indices to `[x, y, w, h]`
/// boxes, e.g. `{"0": [[10, 10, 50, 50]], "3": []}`. Frames without an
/// entry get no detections, which exercises the tracker's gap handling
/// without running a model.
pub struct ScriptedDetector {
    script: HashMap<usize, Vec<BoundingBox>>,
}

impl ScriptedDetector {
    pub fn new(script: HashMap<usize, Vec<BoundingBox>>) -> Self {
        Self { script }
    }

    pub fn from_json(json: &str, origin: &Path) -> Result<Self, ScriptLoadError> {
        let raw: HashMap<String, Vec<[i32; 4]>> =
            serde_json::from_str(json).map_err(|source| ScriptLoadError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        let mut script = HashMap::with_capacity(raw.len());
        for (key, boxes) in raw {
            let index: usize = key
                .trim()
                .parse()
                .map_err(|_| ScriptLoadError::BadKey(key.clone()))?;
            script.insert(index, boxes.into_iter().map(BoundingBox::from).collect());
        }
        Ok(Self { script })
    }

    pub fn load(path: &Path) -> Result<Self, ScriptLoadError> {
        let json = fs::read_to_string(path).map_err(|source| ScriptLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let detector = Self::from_json(&json, path)?;
        log::info!(
            "Loaded detection script {} ({} frames)",
            path.display(),
            detector.script.len()
        );
        Ok(detector)
    }
}

impl SubjectDetector for ScriptedDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        Ok(self.script.get(&frame.index()).cloned().unwrap_or_default())
    }
}
