use std::collections::HashMap;
use std::time::Instant;

/// Observer for per-tick pipeline events.
///
/// Keeps timing and metric bookkeeping out of the tick loop so the CLI can
/// print a summary while tests stay silent.
pub trait PipelineLogger: Send {
    /// Called after each completed tick with the running tick count.
    fn progress(&mut self, ticks: usize);

    /// Record how long a named stage took for one tick.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time value (e.g. detection or region count).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _ticks: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Collects per-stage timings and metrics and reports averages at the end.
///
/// Progress is logged every `throttle_ticks` ticks; a live capture runs
/// at tens of ticks per second.
pub struct SummaryPipelineLogger {
    throttle_ticks: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    ticks: usize,
}

impl SummaryPipelineLogger {
    pub fn new(throttle_ticks: usize) -> Self {
        Self {
            throttle_ticks: throttle_ticks.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            ticks: 0,
        }
    }

    /// Formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Overlay summary ({} ticks, {elapsed_s:.1}s total):",
            self.ticks
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            lines.push(format!(
                "  {stage:8}: avg {:6.1}ms  max {:6.1}ms",
                mean(durations),
                durations.iter().copied().fold(0.0, f64::max),
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: avg {:.1}", mean(&self.metrics[name])));
        }

        if self.ticks > 0 && elapsed_s > 0.0 {
            lines.push(format!("  Tick rate: {:.1}/s", self.ticks as f64 / elapsed_s));
        }

        Some(lines.join("\n"))
    }

}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl Default for SummaryPipelineLogger {
    fn default() -> Self {
        Self::new(60)
    }
}

impl PipelineLogger for SummaryPipelineLogger {
    fn progress(&mut self, ticks: usize) {
        self.ticks = ticks;
        if ticks % self.throttle_ticks == 0 {
            log::info!("Processed {ticks} ticks");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_accepts_everything() {
        let mut logger = NullPipelineLogger;
        logger.progress(1);
        logger.timing("detect", 5.0);
        logger.metric("regions", 3.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_records_timings_per_stage() {
        let mut logger = SummaryPipelineLogger::new(10);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("render", 5.0);

        assert_eq!(logger.timings["detect"], vec![20.0, 30.0]);
        assert_eq!(logger.timings["render"], vec![5.0]);
        assert!(!logger.timings.contains_key("capture"));
    }

    #[test]
    fn test_summary_lists_stages_and_metric_averages() {
        let mut logger = SummaryPipelineLogger::new(10);
        logger.progress(2);
        logger.timing("detect", 20.0);
        logger.timing("track", 0.5);
        logger.metric("regions", 3.0);
        logger.metric("regions", 4.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("2 ticks"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("track"));
        assert!(summary.contains("regions: avg 3.5"));
    }

    #[test]
    fn test_empty_summary_is_none() {
        assert!(SummaryPipelineLogger::default().summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_tick_count() {
        let mut logger = SummaryPipelineLogger::new(4);
        for tick in 1..=9 {
            logger.progress(tick);
        }
        assert_eq!(logger.ticks, 9);
    }

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[]), 0.0);
        assert_relative_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }
}
