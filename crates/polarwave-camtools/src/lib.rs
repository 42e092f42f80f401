//! # PolarWave CAM Tools
//!
//! Toolpath generators that turn raster input into motion on a
//! [`polarwave_motion::KinematicsSink`].
//!
//! ## Tools Included
//!
//! - **Wave Engraver**: renders a grayscale grid as one continuous
//!   boustrophedon stroke whose vertical wiggle encodes darkness
//!
//! ## Supporting Infrastructure
//!
//! - **Sample Grids**: the [`IntensityGrid`] image-source abstraction, an
//!   in-memory [`SampleGrid`], and resampling with contrast stretch

pub mod grid;
pub mod wave_engraver;

pub use grid::{autocontrast, resample, IntensityGrid, ResampleFilter, SampleGrid};
pub use wave_engraver::{WaveParameters, WaveSummary, WaveToolpathGenerator};
