use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::rendering::domain::occlusion_style::OcclusionStyle;
use crate::rendering::domain::render_target::RenderTarget;
use crate::rendering::infrastructure::renderer_factory::RenderOptions;
use crate::shared::constants::{
    DEFAULT_BLUR_KERNEL, DEFAULT_CONFIDENCE, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TINT_RGBA,
    DEFAULT_TTL_SECS, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::tracking::domain::tracker_config::{TrackerConfig, TrackerConfigError};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User-tunable defaults, read from a JSON file.
///
/// Every field is optional in the file; absent ones keep their default.
/// Command-line flags are applied on top after loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ttl_secs: f64,
    pub tick_interval_ms: u64,
    pub style: OcclusionStyle,
    pub blur_strength: usize,
    pub tint: [u8; 4],
    pub confidence: f64,
    pub classes: Option<Vec<usize>>,
    pub target: RenderTarget,
    pub max_ticks: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            style: OcclusionStyle::default(),
            blur_strength: DEFAULT_BLUR_KERNEL,
            tint: DEFAULT_TINT_RGBA,
            confidence: DEFAULT_CONFIDENCE,
            classes: None,
            target: RenderTarget::default(),
            max_ticks: None,
        }
    }
}

impl Settings {
    /// `<config dir>/screenveil/settings.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads from `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads an explicitly named file, or else the per-user file.
    ///
    /// A missing per-user file (or config dir) yields defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("Loading settings from {}", path.display());
                Self::load_from(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn tracker_config(&self) -> Result<TrackerConfig, TrackerConfigError> {
        TrackerConfig::new(self.ttl_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            blur_kernel: self.blur_strength,
            tint: self.tint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_relative_eq!(settings.ttl_secs, 2.5);
        assert_eq!(settings.tick_interval(), Duration::from_millis(16));
        assert_eq!(settings.style, OcclusionStyle::Fill);
        assert_eq!(settings.target, RenderTarget::Frame);
        assert_eq!(settings.max_ticks, None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"ttl_secs": 3.0, "style": "blur", "classes": [0]}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_relative_eq!(settings.ttl_secs, 3.0);
        assert_eq!(settings.style, OcclusionStyle::Blur);
        assert_eq!(settings.classes, Some(vec![0]));
        assert_eq!(settings.blur_strength, DEFAULT_BLUR_KERNEL);
        assert_eq!(settings.tint, DEFAULT_TINT_RGBA);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ ttl_secs: ").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_unknown_style_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"style": "pixelate"}"#).unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_read_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/settings.json"))).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_load_explicit_file_with_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(
            &path,
            r#"{
                "ttl_secs": 1.25,
                "tick_interval_ms": 33,
                "style": "threshold",
                "blur_strength": 15,
                "tint": [0, 255, 0, 64],
                "confidence": 0.6,
                "classes": null,
                "target": "overlay",
                "max_ticks": 30
            }"#,
        )
        .unwrap();

        let expected = Settings {
            ttl_secs: 1.25,
            tick_interval_ms: 33,
            style: OcclusionStyle::Threshold,
            blur_strength: 15,
            tint: [0, 255, 0, 64],
            confidence: 0.6,
            classes: None,
            target: RenderTarget::Overlay,
            max_ticks: Some(30),
        };
        assert_eq!(Settings::load(Some(&path)).unwrap(), expected);
    }

    #[test]
    fn test_tracker_config_validates_ttl() {
        let settings = Settings {
            ttl_secs: -1.0,
            ..Settings::default()
        };
        assert_eq!(
            settings.tracker_config().unwrap_err(),
            TrackerConfigError::InvalidTtl(-1.0)
        );
        assert_relative_eq!(Settings::default().tracker_config().unwrap().ttl(), 2.5);
    }

    #[test]
    fn test_render_options_follow_settings() {
        let settings = Settings {
            blur_strength: 9,
            tint: [1, 2, 3, 4],
            ..Settings::default()
        };
        assert_eq!(
            settings.render_options(),
            RenderOptions {
                blur_kernel: 9,
                tint: [1, 2, 3, 4]
            }
        );
    }
}
