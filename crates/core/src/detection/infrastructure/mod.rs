#[cfg(feature = "onnx")]
pub mod execution_provider;
#[cfg(feature = "onnx")]
pub mod onnx_yolo_detector;
pub mod scripted_detector;
pub mod yolo_postprocess;
