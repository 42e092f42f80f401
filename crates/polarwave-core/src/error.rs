//! Error handling for PolarWave
//!
//! Provides error types for every layer of the planner:
//! - Geometry errors (invalid mechanism configuration)
//! - Motion errors (targets a sink refuses to plan)
//! - Toolpath errors (generator parameters and input grids)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Mechanism configuration error type
///
/// Raised when a mechanism geometry is constructed, before any motion is
/// planned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Cable too short to hang below both anchors
    #[error(
        "Cable length {cable_length} must exceed half the anchor separation ({anchor_separation} / 2)"
    )]
    CableTooShort {
        /// The configured cable length in mm.
        cable_length: f64,
        /// The configured anchor separation in mm.
        anchor_separation: f64,
    },

    /// Parameter is not a finite, positive number
    #[error("Invalid geometry parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// The reason the parameter is invalid.
        reason: String,
    },
}

/// Motion planning error type
///
/// Represents targets that a sink refuses to turn into commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The mechanism cannot physically reach the target
    #[error("Target ({x:.3}, {y:.3}) is unreachable: {reason}")]
    UnreachableTarget {
        /// Target X in mm.
        x: f64,
        /// Target Y in mm.
        y: f64,
        /// Why the target cannot be reached.
        reason: String,
    },

    /// Target contains NaN or infinite coordinates
    #[error("Target ({x}, {y}) is not finite")]
    NonFiniteTarget {
        /// Target X.
        x: f64,
        /// Target Y.
        y: f64,
    },
}

/// Toolpath generation error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolpathError {
    /// Sample grid resampled to zero rows or columns
    #[error("Degenerate sample grid: {columns} columns x {rows} rows")]
    DegenerateGrid {
        /// Number of columns after resampling.
        columns: u32,
        /// Number of rows after resampling.
        rows: u32,
    },

    /// Generator parameter out of range
    #[error("Invalid toolpath parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// The reason the parameter is invalid.
        reason: String,
    },

    /// A move was rejected by the sink
    #[error(transparent)]
    Motion(#[from] MotionError),
}

/// Main error type for PolarWave
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Motion error
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// Toolpath error
    #[error(transparent)]
    Toolpath(#[from] ToolpathError),
}

impl Error {
    /// Check if this is an unreachable-target error, wherever it surfaced
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Error::Motion(MotionError::UnreachableTarget { .. })
                | Error::Toolpath(ToolpathError::Motion(MotionError::UnreachableTarget { .. }))
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for motion planning.
pub type MotionResult<T> = std::result::Result<T, MotionError>;

/// Result type alias for toolpath generation.
pub type ToolpathResult<T> = std::result::Result<T, ToolpathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::CableTooShort {
            cable_length: 600.0,
            anchor_separation: 1340.0,
        };
        assert_eq!(
            err.to_string(),
            "Cable length 600 must exceed half the anchor separation (1340 / 2)"
        );

        let err = GeometryError::InvalidParameter {
            name: "max_feedrate".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid geometry parameter 'max_feedrate': must be positive"
        );
    }

    #[test]
    fn test_motion_error_display() {
        let err = MotionError::UnreachableTarget {
            x: 0.0,
            y: 700.0,
            reason: "at or above the anchor line".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Target (0.000, 700.000) is unreachable: at or above the anchor line"
        );
    }

    #[test]
    fn test_toolpath_error_display() {
        let err = ToolpathError::DegenerateGrid {
            columns: 0,
            rows: 4,
        };
        assert_eq!(err.to_string(), "Degenerate sample grid: 0 columns x 4 rows");
    }

    #[test]
    fn test_error_conversion() {
        let motion = MotionError::NonFiniteTarget {
            x: f64::NAN,
            y: 0.0,
        };
        let toolpath: ToolpathError = motion.clone().into();
        assert!(matches!(toolpath, ToolpathError::Motion(_)));

        let err: Error = GeometryError::InvalidParameter {
            name: "cable_length".to_string(),
            reason: "not finite".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Geometry(_)));
        assert!(!err.is_unreachable());
    }

    #[test]
    fn test_unreachable_detection() {
        let motion = MotionError::UnreachableTarget {
            x: 1.0,
            y: 2.0,
            reason: "test".to_string(),
        };
        let direct: Error = motion.clone().into();
        assert!(direct.is_unreachable());

        let nested: Error = ToolpathError::from(motion).into();
        assert!(nested.is_unreachable());
    }
}
