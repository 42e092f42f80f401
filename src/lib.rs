//! # PolarWave
//!
//! A path planner for two-cable suspended plotters (polargraphs) with:
//! - Cartesian to cable-length kinematics and automatic move splitting
//! - Interchangeable command sinks (polargraph, direct Cartesian, recording)
//! - Turtle-style relative motion
//! - A raster-to-wave toolpath generator
//!
//! ## Architecture
//!
//! PolarWave is organized as a workspace with multiple crates:
//!
//! 1. **polarwave-core** - Point types and the error taxonomy
//! 2. **polarwave-motion** - Kinematic transforms, splitting, sinks, cursor
//! 3. **polarwave-camtools** - Sample grids and the wave toolpath generator
//! 4. **polarwave-settings** - Plotter configuration files
//! 5. **polarwave** - Re-exports, logging setup and the demo binary

pub use polarwave_core::{
    ActuatorCoords, Error, GeometryError, MotionError, Point2D, Result, ToolpathError,
};

pub use polarwave_motion::{
    split_move, CommandLog, DirectCartesianSink, IdentityTransform, KinematicsSink,
    KinematicsTransform, MotionCommand, MoveSplitter, PolargraphGeometry, PolargraphSink,
    PreviewLayout, RecordedStroke, RecordingDecorator, RelativeMotionCursor, StrokeKind,
};

pub use polarwave_camtools::{
    IntensityGrid, ResampleFilter, SampleGrid, WaveParameters, WaveSummary,
    WaveToolpathGenerator,
};

pub use polarwave_settings::{
    default_config_path, MechanismSettings, PlotterConfig, PreviewSettings, SettingsError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, leaving stdout for the command stream
/// - RUST_LOG environment variable support, INFO when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
