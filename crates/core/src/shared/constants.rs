/// Seconds a tracked region survives without a matching detection.
pub const DEFAULT_TTL_SECS: f64 = 2.5;

/// Nominal pause between ticks (~60 fps). Detection latency usually dominates.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Gaussian kernel size for the blur occlusion style (must be odd).
pub const DEFAULT_BLUR_KERNEL: usize = 51;

/// Translucent red used by the tint occlusion style.
pub const DEFAULT_TINT_RGBA: [u8; 4] = [255, 0, 0, 128];

/// Luma cut-off for the threshold occlusion style.
pub const THRESHOLD_LEVEL: u8 = 127;

/// Border width drawn around thresholded regions.
pub const THRESHOLD_BORDER_PX: usize = 2;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const SETTINGS_DIR_NAME: &str = "screenveil";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Minimum detector score for a box to be reported.
pub const DEFAULT_CONFIDENCE: f64 = 0.25;

pub const NMS_IOU_THRESHOLD: f64 = 0.45;
