//! Direct Cartesian sink
//!
//! For plotters whose axes move in X and Y directly. Splitting is off by
//! default since the identity transform keeps straight lines straight.

use crate::command::CommandLog;
use crate::sink::{emit_segment, KinematicsSink, SegmentMode};
use crate::splitter::MoveSplitter;
use crate::transform::IdentityTransform;
use polarwave_core::error::MotionResult;
use polarwave_core::Point2D;

/// Sink emitting plain X/Y moves
#[derive(Debug, Clone)]
pub struct DirectCartesianSink {
    splitter: MoveSplitter,
    position: Point2D,
    log: CommandLog,
}

impl DirectCartesianSink {
    pub fn new() -> Self {
        Self {
            splitter: MoveSplitter::disabled(),
            position: Point2D::ORIGIN,
            log: CommandLog::with_preamble([
                "G21 ; Set units to millimeters",
                "G90 ; Absolute positioning",
            ]),
        }
    }

    /// Subdivide long moves, e.g. for controllers with small planner buffers
    pub fn with_splitter(mut self, splitter: MoveSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    fn segment(&mut self, to: Point2D, mode: SegmentMode) -> MotionResult<()> {
        emit_segment(
            &mut self.log,
            &IdentityTransform,
            &self.splitter,
            self.position,
            to,
            mode,
        )?;
        self.position = to;
        Ok(())
    }
}

impl Default for DirectCartesianSink {
    fn default() -> Self {
        Self::new()
    }
}

impl KinematicsSink for DirectCartesianSink {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_are_verbatim() {
        let mut sink = DirectCartesianSink::new();
        sink.travel_to(Point2D::new(5.0, 5.0)).unwrap();
        sink.move_to(Point2D::new(105.0, -2.5)).unwrap();

        let lines = sink.command_log().lines();
        assert_eq!(
            lines,
            vec![
                "G21 ; Set units to millimeters",
                "G90 ; Absolute positioning",
                "G0 X5.000 Y5.000",
                "G1 X105.000 Y-2.500",
            ]
        );
        assert_eq!(sink.position(), Point2D::new(105.0, -2.5));
    }

    #[test]
    fn test_optional_splitting() {
        let mut sink = DirectCartesianSink::new().with_splitter(MoveSplitter::new(2.0));
        sink.move_to(Point2D::new(6.0, 0.0)).unwrap();
        let lines = sink.command_log().lines();
        assert_eq!(
            &lines[2..],
            &[
                "G1 X0.000 Y0.000",
                "G1 X2.000 Y0.000",
                "G1 X4.000 Y0.000",
                "G1 X6.000 Y0.000",
            ]
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut sink = DirectCartesianSink::new();
        assert!(sink.move_to(Point2D::new(f64::NAN, 1.0)).is_err());
        assert_eq!(sink.command_log().motion_count(), 0);
    }
}
