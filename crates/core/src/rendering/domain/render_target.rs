use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where occlusion is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    /// Directly onto the captured frame.
    #[default]
    Frame,
    /// Onto a transparent RGBA surface meant to sit above the screen.
    Overlay,
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTarget::Frame => write!(f, "frame"),
            RenderTarget::Overlay => write!(f, "overlay"),
        }
    }
}

impl FromStr for RenderTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frame" => Ok(RenderTarget::Frame),
            "overlay" => Ok(RenderTarget::Overlay),
            other => Err(format!(
                "unknown render target {other:?} (expected frame or overlay)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("frame".parse::<RenderTarget>().unwrap(), RenderTarget::Frame);
        assert_eq!("Overlay".parse::<RenderTarget>().unwrap(), RenderTarget::Overlay);
        assert!("window".parse::<RenderTarget>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&RenderTarget::Overlay).unwrap(),
            "\"overlay\""
        );
    }
}
