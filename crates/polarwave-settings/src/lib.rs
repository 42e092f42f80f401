//! PolarWave Settings Crate
//!
//! Loads, validates and saves the plotter configuration: mechanism
//! geometry, wave toolpath parameters and preview rendering options.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, ConfigFormat, MechanismSettings, PlotterConfig, PreviewSettings,
};
pub use error::{SettingsError, SettingsResult};
