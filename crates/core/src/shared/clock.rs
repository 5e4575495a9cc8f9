use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Seconds on a monotonic time base.
pub type Timestamp = f64;

/// Source of `now` for the pipeline.
///
/// The pipeline reads time only through this port, so replays and tests
/// can drive the tracker with deterministic timestamps.
pub trait Clock: Send {
    fn now(&self) -> Timestamp;

    /// Called once per tick before `now`. Wall clocks ignore it.
    fn advance(&self) {}
}

impl<C: Clock + Sync> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn advance(&self) {
        (**self).advance()
    }
}

/// Seconds elapsed since construction.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that moves only when told to.
///
/// With a non-zero `step`, every [`Clock::advance`] adds `step` seconds,
/// which models a recorded capture with a fixed frame period. The first
/// tick observes `start`. Shareable through `Arc` so a test can move time between ticks.
pub struct ManualClock {
    current_bits: AtomicU64,
    step: Timestamp,
    started: AtomicBool,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self::with_step(start, 0.0)
    }

    pub fn with_step(start: Timestamp, step: Timestamp) -> Self {
        Self {
            current_bits: AtomicU64::new(start.to_bits()),
            step,
            started: AtomicBool::new(false),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.current_bits.store(now.to_bits(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        f64::from_bits(self.current_bits.load(Ordering::SeqCst))
    }

    fn advance(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            self.set(self.now() + self.step);
        }
    }
}
