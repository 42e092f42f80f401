//! Demo driver: `polarwave [CONFIG] [IMAGE]`
//!
//! Loads the plotter config (the given path, else the default location when
//! present, else built-in defaults), renders IMAGE or a radial gradient as a
//! wave toolpath and prints the polargraph command stream to stdout.

use anyhow::Context;
use image::{GrayImage, Luma};
use polarwave::{
    default_config_path, init_logging, Error, KinematicsSink, PlotterConfig, RecordingDecorator,
    WaveToolpathGenerator, BUILD_DATE, VERSION,
};
use std::path::{Path, PathBuf};

fn load_config(arg: Option<&str>) -> anyhow::Result<PlotterConfig> {
    if let Some(path) = arg {
        return PlotterConfig::load_from_file(Path::new(path))
            .with_context(|| format!("loading config {}", path));
    }

    match default_config_path() {
        Ok(path) if path.exists() => PlotterConfig::load_from_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        _ => {
            tracing::info!("No config file found, using defaults");
            Ok(PlotterConfig::default())
        }
    }
}

/// Dark centre fading to white at the corners
fn radial_gradient(size: u32) -> GrayImage {
    let c = size as f64 / 2.0;
    let max = c * std::f64::consts::SQRT_2;
    GrayImage::from_fn(size, size, |x, y| {
        let d = (x as f64 - c).hypot(y as f64 - c) / max;
        Luma([(d.min(1.0) * 255.0) as u8])
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(version = VERSION, build_date = BUILD_DATE, "PolarWave");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;

    let source = match args.get(1).map(PathBuf::from) {
        Some(path) => image::open(&path)
            .with_context(|| format!("opening image {}", path.display()))?
            .to_luma8(),
        None => radial_gradient(256),
    };

    let mut sink = RecordingDecorator::new(config.build_sink()?);
    let summary = WaveToolpathGenerator::new(config.wave_parameters())
        .generate(&source, &mut sink)
        .map_err(Error::from)
        .inspect_err(|e| {
            if e.is_unreachable() {
                tracing::error!("Frame leaves the reachable area; reduce waves.frame_half_width");
            }
        })?;

    print!("{}", sink.command_log());

    let layout = config.preview_layout(&sink);
    tracing::info!(
        scan_lines = summary.scan_lines(),
        moves = summary.moves,
        travels = summary.travels,
        commands = sink.command_log().len(),
        drawn_mm = sink.drawn_length(),
        preview_width = layout.width,
        preview_height = layout.height,
        preview_line_width = layout.line_width,
        "Toolpath complete"
    );

    Ok(())
}
