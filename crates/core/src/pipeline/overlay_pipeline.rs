use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::subject_detector::SubjectDetector;
use crate::output::domain::frame_sink::FrameSink;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::rendering::domain::occlusion_renderer::OcclusionRenderer;
use crate::rendering::domain::render_target::RenderTarget;
use crate::shared::clock::Clock;
use crate::shared::constants::DEFAULT_TICK_INTERVAL_MS;
use crate::shared::frame::Frame;
use crate::tracking::domain::region_tracker::RegionTracker;
use crate::tracking::domain::tracked_region::TrackedRegion;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("capture failed: {0}")]
    Capture(String),
    #[error("rendering frame {index} failed: {message}")]
    Render { index: usize, message: String },
    #[error("writing frame {index} failed: {message}")]
    Sink { index: usize, message: String },
}

/// Loop settings for [`OverlayPipeline::run`].
pub struct PipelineConfig {
    /// Minimum wall time per tick; faster ticks sleep the remainder.
    pub tick_interval: Duration,
    pub max_ticks: Option<usize>,
    pub target: RenderTarget,
    /// Checked between ticks. Set it to stop the run cleanly.
    pub cancelled: Arc<AtomicBool>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            max_ticks: None,
            target: RenderTarget::default(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub index: usize,
    pub detections: usize,
    pub regions: Vec<TrackedRegion>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Rendered(TickReport),
    SourceExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    SourceExhausted,
    MaxTicks,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    pub stop_reason: StopReason,
}

/// Capture → detect → track → render → write, one frame per tick.
///
/// Ticks never overlap. Time is read only from the injected clock, so the
/// same pipeline serves live capture and deterministic replays.
pub struct OverlayPipeline {
    source: Box<dyn FrameSource>,
    detector: Box<dyn SubjectDetector>,
    tracker: Box<dyn RegionTracker>,
    renderer: Box<dyn OcclusionRenderer>,
    sink: Box<dyn FrameSink>,
    clock: Box<dyn Clock>,
    logger: Box<dyn PipelineLogger>,
    config: PipelineConfig,
    ticks: usize,
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

impl OverlayPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn SubjectDetector>,
        tracker: Box<dyn RegionTracker>,
        renderer: Box<dyn OcclusionRenderer>,
        sink: Box<dyn FrameSink>,
        clock: Box<dyn Clock>,
        logger: Box<dyn PipelineLogger>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            detector,
            tracker,
            renderer,
            sink,
            clock,
            logger,
            config,
            ticks: 0,
        }
    }

    /// Runs a single tick.
    ///
    /// A failing detector does not abort the tick: it counts as "nothing
    /// detected", so existing regions keep ageing toward their TTL.
    pub fn tick(&mut self) -> Result<TickOutcome, PipelineError> {
        let t = Instant::now();
        let frame = match self.source.capture() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(TickOutcome::SourceExhausted),
            Err(e) => return Err(PipelineError::Capture(e.to_string())),
        };
        self.logger.timing("capture", elapsed_ms(t));
        let index = frame.index();

        let t = Instant::now();
        let detections = self.detector.detect(&frame).unwrap_or_else(|e| {
            log::warn!("Detection failed on frame {index}, treating as empty: {e}");
            Vec::new()
        });
        self.logger.timing("detect", elapsed_ms(t));

        let t = Instant::now();
        self.clock.advance();
        let now = self.clock.now();
        let regions = self.tracker.update(&detections, now).to_vec();
        self.logger.timing("track", elapsed_ms(t));
        self.logger.metric("detections", detections.len() as f64);
        self.logger.metric("regions", regions.len() as f64);

        let t = Instant::now();
        let surface = self.render(frame, &regions)?;
        self.logger.timing("render", elapsed_ms(t));

        let t = Instant::now();
        self.sink
            .write(&surface)
            .map_err(|e| PipelineError::Sink {
                index,
                message: e.to_string(),
            })?;
        self.logger.timing("write", elapsed_ms(t));

        self.ticks += 1;
        self.logger.progress(self.ticks);
        log::debug!(
            "Tick {} (frame {index}, t={now:.3}): {} detections, {} regions",
            self.ticks,
            detections.len(),
            regions.len()
        );

        Ok(TickOutcome::Rendered(TickReport {
            index,
            detections: detections.len(),
            regions,
        }))
    }

    fn render(&self, frame: Frame, regions: &[TrackedRegion]) -> Result<Frame, PipelineError> {
        let index = frame.index();
        let to_error = |e: Box<dyn std::error::Error>| PipelineError::Render {
            index,
            message: e.to_string(),
        };
        match self.config.target {
            RenderTarget::Frame => {
                let mut surface = frame;
                self.renderer
                    .render(&mut surface, None, regions)
                    .map_err(to_error)?;
                Ok(surface)
            }
            RenderTarget::Overlay => {
                let mut surface = Frame::transparent_overlay(&frame);
                self.renderer
                    .render(&mut surface, Some(&frame), regions)
                    .map_err(to_error)?;
                Ok(surface)
            }
        }
    }

    /// Ticks until the source runs dry, `max_ticks` is reached or the run
    /// is cancelled, then emits the logger summary.
    pub fn run(&mut self) -> Result<RunSummary, PipelineError> {
        self.logger.info(&format!(
            "Starting overlay loop ({:?} target, {}ms interval)",
            self.config.target,
            self.config.tick_interval.as_millis()
        ));

        let stop_reason = loop {
            if self.config.cancelled.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            if self.config.max_ticks.is_some_and(|max| self.ticks >= max) {
                break StopReason::MaxTicks;
            }

            let started = Instant::now();
            if self.tick()? == TickOutcome::SourceExhausted {
                break StopReason::SourceExhausted;
            }

            let remaining = self.config.tick_interval.saturating_sub(started.elapsed());
            if !remaining.is_zero() {
                thread::sleep(remaining);
            }
        };

        log::info!("Overlay loop stopped after {} ticks: {stop_reason:?}", self.ticks);
        self.logger.summary();
        Ok(RunSummary {
            ticks: self.ticks,
            stop_reason,
        })
    }
}
