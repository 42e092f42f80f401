//! Configuration and settings management for PolarWave
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default location is platform specific.
//!
//! Configuration is organized into logical sections:
//! - Mechanism (anchor geometry, feed rate, move splitting)
//! - Waves (scan line pitch, frame size, resampling)
//! - Preview (raster scale and border for external renderers)

use crate::error::{SettingsError, SettingsResult};
use polarwave_camtools::WaveParameters;
use polarwave_core::ToolpathError;
use polarwave_motion::{
    KinematicsSink, MoveSplitter, PolargraphGeometry, PolargraphSink, PreviewLayout,
    RecordingDecorator,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
const APP_DIR: &str = "polarwave";
const CONFIG_FILE: &str = "config.toml";

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(SettingsError::UnsupportedFormat(other.to_string())),
            None => Err(SettingsError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
        }
    }
}

/// Mechanism settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechanismSettings {
    /// Horizontal distance between the two anchors in mm
    pub anchor_separation: f64,
    /// Cable length from anchor to pen at the home position in mm
    pub cable_length: f64,
    /// Feed rate limit written to the command preamble
    pub max_feedrate: f64,
    /// Longest move sent without subdivision in mm
    pub split_threshold: f64,
    /// Subdivide long moves at all
    pub split_moves: bool,
}

impl Default for MechanismSettings {
    fn default() -> Self {
        Self {
            anchor_separation: 1340.0,
            cable_length: 900.0,
            max_feedrate: 5000.0,
            split_threshold: MoveSplitter::DEFAULT_SEGMENT_LENGTH,
            split_moves: true,
        }
    }
}

/// Preview rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Raster resolution
    pub pixels_per_mm: f64,
    /// Stroke width
    pub line_thickness_mm: f64,
    /// Extra pixels added to each image axis
    pub border_px: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            pixels_per_mm: 2.0,
            line_thickness_mm: 1.0,
            border_px: 20,
        }
    }
}

/// Complete plotter configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlotterConfig {
    pub mechanism: MechanismSettings,
    pub waves: WaveParameters,
    pub preview: PreviewSettings,
}

/// `<config dir>/polarwave/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}

fn require_positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("must be a positive number, got {}", value),
        ))
    }
}

impl PlotterConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("cannot read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), ?format, "Loaded plotter config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let format = ConfigFormat::from_path(path)?;
        self.validate()?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        tracing::debug!(path = %path.display(), ?format, "Saved plotter config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.geometry()?;
        // JSON has no infinity; disabling goes through `split_moves`
        require_positive("mechanism.split_threshold", self.mechanism.split_threshold)?;

        self.waves.validate().map_err(|e| match e {
            ToolpathError::InvalidParameter { name, reason } => {
                SettingsError::invalid(format!("waves.{}", name), reason)
            }
            other => SettingsError::invalid("waves", other.to_string()),
        })?;
        if self.waves.line_count() == 0 {
            return Err(SettingsError::invalid(
                "waves.line_height",
                "frame is too small for a single scan line",
            ));
        }
        if self.waves.segment_count() == 0 {
            return Err(SettingsError::invalid(
                "waves.line_segment_length",
                "frame is too small for a single segment",
            ));
        }

        require_positive("preview.pixels_per_mm", self.preview.pixels_per_mm)?;
        require_positive("preview.line_thickness_mm", self.preview.line_thickness_mm)?;

        Ok(())
    }

    /// Mechanism geometry
    pub fn geometry(&self) -> SettingsResult<PolargraphGeometry> {
        Ok(PolargraphGeometry::new(
            self.mechanism.anchor_separation,
            self.mechanism.cable_length,
            self.mechanism.max_feedrate,
        )?)
    }

    pub fn splitter(&self) -> MoveSplitter {
        if self.mechanism.split_moves {
            MoveSplitter::new(self.mechanism.split_threshold)
        } else {
            MoveSplitter::disabled()
        }
    }

    pub fn wave_parameters(&self) -> WaveParameters {
        self.waves
    }

    /// A polargraph sink configured from the mechanism section
    pub fn build_sink(&self) -> SettingsResult<PolargraphSink> {
        Ok(PolargraphSink::new(self.geometry()?).with_splitter(self.splitter()))
    }

    /// Lay out a recording with the preview section's scale, stroke and border
    pub fn preview_layout<S: KinematicsSink>(
        &self,
        recording: &RecordingDecorator<S>,
    ) -> PreviewLayout {
        recording.preview_layout(
            self.preview.pixels_per_mm,
            self.preview.line_thickness_mm,
            self.preview.border_px,
        )
    }
}
