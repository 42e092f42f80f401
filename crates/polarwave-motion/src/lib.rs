//! # PolarWave Motion
//!
//! Turns Cartesian move requests into ordered machine commands.
//!
//! ## Pipeline
//!
//! - **Transforms**: map Cartesian targets into actuator space
//!   ([`IdentityTransform`] for direct plotters, [`PolargraphGeometry`] for
//!   two-cable suspended plotters)
//! - **Move Splitter**: subdivides long moves so a nonlinear transform is
//!   sampled densely enough to approximate a straight line
//! - **Sinks**: accumulate an append-only [`CommandLog`]
//!   ([`DirectCartesianSink`], [`PolargraphSink`])
//! - **Recording Decorator**: captures the Cartesian stroke stream of any sink
//!   for external preview rendering
//! - **Cursor**: relative "turtle" motion on top of any sink

pub mod cartesian;
pub mod command;
pub mod cursor;
pub mod polargraph;
pub mod recording;
pub mod sink;
pub mod splitter;
pub mod transform;

pub use cartesian::DirectCartesianSink;
pub use command::{CommandLog, MotionCommand};
pub use cursor::RelativeMotionCursor;
pub use polargraph::PolargraphSink;
pub use recording::{PreviewLayout, RecordedStroke, RecordingDecorator, StrokeKind};
pub use sink::KinematicsSink;
pub use splitter::{split_move, MoveSplitter, MAX_SUBDIVISIONS};
pub use transform::{IdentityTransform, KinematicsTransform, PolargraphGeometry};
