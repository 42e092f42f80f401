//! Kinematics sink abstraction
//!
//! A sink receives absolute Cartesian move requests and turns them into
//! commands in its own coordinate space. Every sink tracks its own notion of
//! the current position; callers never share it.

use crate::command::{CommandLog, MotionCommand};
use crate::splitter::MoveSplitter;
use crate::transform::KinematicsTransform;
use polarwave_core::error::MotionResult;
use polarwave_core::{ActuatorCoords, Point2D};

/// Consumer of Cartesian moves.
pub trait KinematicsSink {
    /// Drawing move to `to`.
    fn move_to(&mut self, to: Point2D) -> MotionResult<()>;

    /// Pen-up repositioning to `to`.
    fn travel_to(&mut self, to: Point2D) -> MotionResult<()>;

    /// Commands accumulated so far, in emission order.
    fn command_log(&self) -> &CommandLog;

    /// Last position accepted by this sink.
    fn position(&self) -> Point2D;
}

impl<S: KinematicsSink + ?Sized> KinematicsSink for &mut S {
    fn move_to(&mut self, to: Point2D) -> MotionResult<()> {
        (**self).move_to(to)
    }

    fn travel_to(&mut self, to: Point2D) -> MotionResult<()> {
        (**self).travel_to(to)
    }

    fn command_log(&self) -> &CommandLog {
        (**self).command_log()
    }

    fn position(&self) -> Point2D {
        (**self).position()
    }
}

impl<S: KinematicsSink + ?Sized> KinematicsSink for Box<S> {
    fn move_to(&mut self, to: Point2D) -> MotionResult<()> {
        (**self).move_to(to)
    }

    fn travel_to(&mut self, to: Point2D) -> MotionResult<()> {
        (**self).travel_to(to)
    }

    fn command_log(&self) -> &CommandLog {
        (**self).command_log()
    }

    fn position(&self) -> Point2D {
        (**self).position()
    }
}

/// Whether a planned segment draws or travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentMode {
    Draw,
    Travel,
}

/// Plan `from -> to` through `splitter` and `transform` and append the result
/// to `log`.
///
/// The target is validated before anything is appended, so a rejected move
/// leaves the log untouched. Intermediate waypoints lie on the segment
/// between two accepted positions and need no separate check.
pub(crate) fn emit_segment<T: KinematicsTransform>(
    log: &mut CommandLog,
    transform: &T,
    splitter: &MoveSplitter,
    from: Point2D,
    to: Point2D,
    mode: SegmentMode,
) -> MotionResult<usize> {
    if let Err(e) = transform.check_reachable(to) {
        tracing::warn!("Rejected move to {}: {}", to, e);
        return Err(e);
    }

    let coords: Vec<ActuatorCoords> = splitter
        .split(from, to)
        .into_iter()
        .chain(std::iter::once(to))
        .map(|p| transform.to_actuator(p))
        .collect();

    let emitted = coords.len();
    for c in coords {
        log.push(match mode {
            SegmentMode::Draw => MotionCommand::Linear(c),
            SegmentMode::Travel => MotionCommand::Rapid(c),
        });
    }

    tracing::trace!(?mode, %from, %to, emitted, "Planned segment");
    Ok(emitted)
}
