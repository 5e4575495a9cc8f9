use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use screenveil_core::capture::domain::frame_source::FrameSource;
use screenveil_core::capture::infrastructure::image_sequence_source::ImageSequenceSource;
use screenveil_core::config::settings::Settings;
use screenveil_core::detection::domain::subject_detector::SubjectDetector;
use screenveil_core::detection::infrastructure::scripted_detector::ScriptedDetector;
use screenveil_core::output::domain::frame_sink::FrameSink;
use screenveil_core::output::infrastructure::image_directory_sink::ImageDirectorySink;
use screenveil_core::output::infrastructure::null_sink::NullSink;
use screenveil_core::pipeline::overlay_pipeline::{OverlayPipeline, PipelineConfig};
use screenveil_core::pipeline::pipeline_logger::SummaryPipelineLogger;
use screenveil_core::rendering::domain::occlusion_style::OcclusionStyle;
use screenveil_core::rendering::domain::render_target::RenderTarget;
use screenveil_core::rendering::infrastructure::renderer_factory::create_renderer;
use screenveil_core::shared::clock::{Clock, ManualClock, MonotonicClock};
use screenveil_core::tracking::domain::ttl_region_tracker::TtlRegionTracker;

/// Tracks detected subjects across captured frames and occludes them.
#[derive(Parser)]
#[command(name = "screenveil", version)]
struct Cli {
    /// Replay screenshots from this directory (lexicographic order).
    #[arg(long, conflicts_with = "screen")]
    frames: Option<PathBuf>,

    /// Capture a live monitor (requires the `screen-capture` feature).
    #[arg(long)]
    screen: bool,

    /// Monitor index for --screen (default: primary).
    #[arg(long, requires = "screen")]
    monitor: Option<usize>,

    /// JSON detection script keyed by frame index.
    #[arg(long, conflicts_with = "model")]
    detections: Option<PathBuf>,

    /// YOLO ONNX model (requires the `onnx` feature).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Class-score count of a detection-head model; omit for a pose model.
    #[arg(long, requires = "model")]
    num_classes: Option<usize>,

    /// Detection confidence threshold (0.0-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Only keep these class ids (comma-separated).
    #[arg(long, value_delimiter = ',')]
    classes: Option<Vec<usize>>,

    /// Seconds a region outlives its last detection.
    #[arg(long)]
    ttl: Option<f64>,

    /// Minimum milliseconds per tick.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Advance time by a fixed step per tick instead of reading the wall clock.
    #[arg(long)]
    frame_period: Option<f64>,

    /// Occlusion style: fill, tint, threshold or blur.
    #[arg(long)]
    style: Option<OcclusionStyle>,

    /// Gaussian kernel size for --style blur.
    #[arg(long)]
    blur_strength: Option<usize>,

    /// Paint onto the frame itself or onto a transparent overlay.
    #[arg(long)]
    target: Option<RenderTarget>,

    /// Write rendered frames as PNGs into this directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(long)]
    max_ticks: Option<usize>,

    /// Settings file (default: per-user config directory).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = merge_settings(Settings::load(cli.config.as_deref())?, &cli);
    validate(&cli, &settings)?;

    let source = build_source(&cli)?;
    let detector = build_detector(&cli, &settings)?;
    let tracker = TtlRegionTracker::new(settings.tracker_config()?);
    let renderer = create_renderer(settings.style, &settings.render_options());
    let sink: Box<dyn FrameSink> = match &cli.output {
        Some(dir) => Box::new(ImageDirectorySink::new(dir)),
        None => Box::new(NullSink),
    };
    let clock: Box<dyn Clock> = match cli.frame_period {
        Some(period) => Box::new(ManualClock::with_step(0.0, period)),
        None => Box::new(MonotonicClock::new()),
    };

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))?;

    let config = PipelineConfig {
        tick_interval: settings.tick_interval(),
        max_ticks: settings.max_ticks,
        target: settings.target,
        cancelled,
    };

    let mut pipeline = OverlayPipeline::new(
        source,
        detector,
        Box::new(tracker),
        renderer,
        sink,
        clock,
        Box::new(SummaryPipelineLogger::default()),
        config,
    );
    let summary = pipeline.run()?;

    log::info!("Done: {} ticks ({:?})", summary.ticks, summary.stop_reason);
    if let Some(dir) = &cli.output {
        log::info!("Frames written to {}", dir.display());
    }
    Ok(())
}

/// Command-line flags win over loaded settings.
fn merge_settings(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(ttl) = cli.ttl {
        settings.ttl_secs = ttl;
    }
    if let Some(ms) = cli.interval_ms {
        settings.tick_interval_ms = ms;
    }
    if let Some(style) = cli.style {
        settings.style = style;
    }
    if let Some(k) = cli.blur_strength {
        settings.blur_strength = k;
    }
    if let Some(confidence) = cli.confidence {
        settings.confidence = confidence;
    }
    if let Some(classes) = &cli.classes {
        settings.classes = Some(classes.clone());
    }
    if let Some(target) = cli.target {
        settings.target = target;
    }
    if cli.max_ticks.is_some() {
        settings.max_ticks = cli.max_ticks;
    }
    settings
}

fn validate(cli: &Cli, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    if cli.frames.is_none() && !cli.screen {
        return Err("Choose a frame source: --frames DIR or --screen".into());
    }
    if cli.detections.is_none() && cli.model.is_none() {
        return Err("Choose a detector: --detections FILE or --model FILE".into());
    }
    if !(0.0..=1.0).contains(&settings.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            settings.confidence
        )
        .into());
    }
    if settings.blur_strength == 0 {
        return Err("Blur strength must be a positive integer".into());
    }
    if let Some(period) = cli.frame_period {
        if !period.is_finite() || period < 0.0 {
            return Err(format!("Frame period must be a non-negative number, got {period}").into());
        }
    }
    Ok(())
}

fn build_source(cli: &Cli) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    if let Some(dir) = &cli.frames {
        return Ok(Box::new(ImageSequenceSource::open(dir)?));
    }
    open_screen(cli.monitor)
}

#[cfg(feature = "screen-capture")]
fn open_screen(monitor: Option<usize>) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    use screenveil_core::capture::infrastructure::screen_source::ScreenSource;
    Ok(Box::new(ScreenSource::open(monitor)?))
}

#[cfg(not(feature = "screen-capture"))]
fn open_screen(_monitor: Option<usize>) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    Err("--screen needs a build with the `screen-capture` feature".into())
}

fn build_detector(
    cli: &Cli,
    settings: &Settings,
) -> Result<Box<dyn SubjectDetector>, Box<dyn std::error::Error>> {
    if let Some(script) = &cli.detections {
        return Ok(Box::new(ScriptedDetector::load(script)?));
    }
    match &cli.model {
        Some(model) => open_model(model, cli.num_classes, settings),
        None => Err("no detector configured".into()),
    }
}

#[cfg(feature = "onnx")]
fn open_model(
    model: &std::path::Path,
    num_classes: Option<usize>,
    settings: &Settings,
) -> Result<Box<dyn SubjectDetector>, Box<dyn std::error::Error>> {
    use screenveil_core::detection::infrastructure::onnx_yolo_detector::{
        OnnxYoloDetector, YoloOptions,
    };
    use screenveil_core::detection::infrastructure::yolo_postprocess::{
        DetectionFilter, YoloHead,
    };

    let head = match num_classes {
        Some(num_classes) => YoloHead::Detect { num_classes },
        None => YoloHead::Pose,
    };
    let options = YoloOptions {
        head,
        filter: DetectionFilter {
            confidence: settings.confidence,
            classes: settings.classes.clone(),
        },
    };
    Ok(Box::new(OnnxYoloDetector::new(model, options)?))
}

#[cfg(not(feature = "onnx"))]
fn open_model(
    _model: &std::path::Path,
    _num_classes: Option<usize>,
    _settings: &Settings,
) -> Result<Box<dyn SubjectDetector>, Box<dyn std::error::Error>> {
    Err("--model needs a build with the `onnx` feature".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("screenveil").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = parse(&[
            "--frames", "shots", "--detections", "d.json", "--ttl", "1.5", "--style", "blur",
            "--target", "overlay", "--classes", "0,2", "--max-ticks", "9",
        ]);
        let settings = merge_settings(Settings::default(), &cli);

        assert_relative_eq!(settings.ttl_secs, 1.5);
        assert_eq!(settings.style, OcclusionStyle::Blur);
        assert_eq!(settings.target, RenderTarget::Overlay);
        assert_eq!(settings.classes, Some(vec![0, 2]));
        assert_eq!(settings.max_ticks, Some(9));
        assert_eq!(settings.tick_interval_ms, Settings::default().tick_interval_ms);
    }

    #[test]
    fn test_absent_flags_keep_loaded_settings() {
        let cli = parse(&["--frames", "shots", "--detections", "d.json"]);
        let loaded = Settings {
            ttl_secs: 4.0,
            max_ticks: Some(2),
            ..Settings::default()
        };
        assert_eq!(merge_settings(loaded.clone(), &cli), loaded);
    }

    #[test]
    fn test_requires_source_and_detector() {
        let settings = Settings::default();
        assert!(validate(&parse(&["--detections", "d.json"]), &settings).is_err());
        assert!(validate(&parse(&["--frames", "shots"]), &settings).is_err());
        assert!(validate(&parse(&["--frames", "shots", "--detections", "d.json"]), &settings).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let cli = parse(&["--frames", "s", "--detections", "d", "--confidence", "1.5"]);
        let settings = merge_settings(Settings::default(), &cli);
        assert!(validate(&cli, &settings).is_err());
    }

    #[test]
    fn test_conflicting_sources_rejected_by_parser() {
        let result = Cli::try_parse_from(["screenveil", "--frames", "s", "--screen"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_style_rejected_by_parser() {
        let result = Cli::try_parse_from(["screenveil", "--style", "pixelate"]);
        assert!(result.is_err());
    }
}
