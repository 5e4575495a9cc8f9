pub mod subject_detector;
