//! Polargraph sink
//!
//! Emits cable-space commands for a two-cable suspended plotter. Every move
//! is split into short segments so the straight Cartesian line survives the
//! nonlinear transform.

use crate::command::CommandLog;
use crate::sink::{emit_segment, KinematicsSink, SegmentMode};
use crate::splitter::MoveSplitter;
use crate::transform::PolargraphGeometry;
use polarwave_core::error::MotionResult;
use polarwave_core::Point2D;

/// Sink for a two-cable suspended plotter
#[derive(Debug, Clone)]
pub struct PolargraphSink {
    geometry: PolargraphGeometry,
    splitter: MoveSplitter,
    position: Point2D,
    log: CommandLog,
}

impl PolargraphSink {
    /// Create a sink positioned at home.
    ///
    /// The log starts with the setup preamble: declare the current position
    /// as the origin, select absolute mode, and limit the feedrate.
    pub fn new(geometry: PolargraphGeometry) -> Self {
        let feed = geometry.max_feedrate();
        let log = CommandLog::with_preamble([
            "G28.3 ; set current position to 0,0".to_string(),
            "G90 ; absolute mode".to_string(),
            format!("M203 X{} Y{}", feed, feed),
        ]);

        tracing::debug!(
            anchor_separation = geometry.anchor_separation(),
            cable_length = geometry.cable_length(),
            anchor_height = geometry.anchor_height(),
            "Created polargraph sink"
        );

        Self {
            geometry,
            splitter: MoveSplitter::default(),
            position: Point2D::ORIGIN,
            log,
        }
    }

    /// Replace the default 5 mm splitting policy
    pub fn with_splitter(mut self, splitter: MoveSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn geometry(&self) -> &PolargraphGeometry {
        &self.geometry
    }

    pub fn splitter(&self) -> &MoveSplitter {
        &self.splitter
    }

    fn segment(&mut self, to: Point2D, mode: SegmentMode) -> MotionResult<()> {
        emit_segment(
            &mut self.log,
            &self.geometry,
            &self.splitter,
            self.position,
            to,
            mode,
        )?;
        self.position = to;
        Ok(())
    }
}

impl KinematicsSink for PolargraphSink {
    fn move_to(&mut self, to: Point2D) -> MotionResult<()> {
        self.segment(to, SegmentMode::Draw)
    }

    fn travel_to(&mut self, to: Point2D) -> MotionResult<()> {
        self.segment(to, SegmentMode::Travel)
    }

    fn command_log(&self) -> &CommandLog {
        &self.log
    }

    fn position(&self) -> Point2D {
        self.position
    }
}
