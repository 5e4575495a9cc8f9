use thiserror::Error;

use crate::shared::constants::DEFAULT_TTL_SECS;

#[derive(Error, Debug, PartialEq)]
pub enum TrackerConfigError {
    #[error("ttl must be a finite, non-negative number of seconds (got {0})")]
    InvalidTtl(f64),
}

/// Tuning for [`TtlRegionTracker`](super::ttl_region_tracker::TtlRegionTracker).
///
/// TTL is the only knob: the match window is derived from each detection's
/// own size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    ttl: f64,
}

impl TrackerConfig {
    pub fn new(ttl: f64) -> Result<Self, TrackerConfigError> {
        if !ttl.is_finite() || ttl < 0.0 {
            return Err(TrackerConfigError::InvalidTtl(ttl));
        }
        Ok(Self { ttl })
    }

    /// Seconds a region may go unconfirmed before it is dropped.
    pub fn ttl(&self) -> f64 {
        self.ttl
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL_SECS,
        }
    }
}
