use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a tracked region is hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcclusionStyle {
    /// Opaque black box.
    #[default]
    Fill,
    /// Translucent colour wash.
    Tint,
    /// Black-and-white binary threshold with a white outline.
    Threshold,
    /// Gaussian blur.
    Blur,
}

impl OcclusionStyle {
    pub const ALL: &[OcclusionStyle] = &[
        OcclusionStyle::Fill,
        OcclusionStyle::Tint,
        OcclusionStyle::Threshold,
        OcclusionStyle::Blur,
    ];
}

impl fmt::Display for OcclusionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcclusionStyle::Fill => write!(f, "fill"),
            OcclusionStyle::Tint => write!(f, "tint"),
            OcclusionStyle::Threshold => write!(f, "threshold"),
            OcclusionStyle::Blur => write!(f, "blur"),
        }
    }
}

impl FromStr for OcclusionStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown occlusion style {s:?} (expected fill, tint, threshold or blur)")
            })
    }
}
