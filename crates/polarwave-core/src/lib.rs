//! # PolarWave Core
//!
//! Core types and error handling shared by every PolarWave crate.
//! Provides the planar point and actuator coordinate value types and the
//! error taxonomy used by the motion planner and toolpath generators.

pub mod error;
pub mod geometry;

pub use error::{
    Error, GeometryError, MotionError, MotionResult, Result, ToolpathError, ToolpathResult,
};
pub use geometry::{ActuatorCoords, Point2D};
