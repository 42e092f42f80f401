//! Relative motion cursor
//!
//! Turtle-style heading and distance motion on top of any sink. Heading 0
//! points along +x and positive turns are counter-clockwise.

use crate::sink::KinematicsSink;
use polarwave_core::error::MotionResult;
use polarwave_core::Point2D;
use std::f64::consts::TAU;

/// Stateful heading + position wrapper around a sink
#[derive(Debug, Clone)]
pub struct RelativeMotionCursor<S> {
    sink: S,
    position: Point2D,
    heading: f64,
}

fn normalize(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

impl<S: KinematicsSink> RelativeMotionCursor<S> {
    /// Cursor at the origin, heading along +x
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            position: Point2D::ORIGIN,
            heading: 0.0,
        }
    }

    /// Rotate by `degrees`; no move is issued
    pub fn turn(&mut self, degrees: f64) {
        self.heading = normalize(self.heading + degrees.to_radians());
    }

    /// Set the absolute heading in degrees
    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = normalize(degrees.to_radians());
    }

    /// Move `distance` along the current heading
    pub fn move_by(&mut self, distance: f64) -> MotionResult<()> {
        let target = Point2D::new(
            self.position.x + distance * self.heading.cos(),
            self.position.y + distance * self.heading.sin(),
        );
        self.move_to(target)
    }

    /// Move to an absolute position; the heading is unchanged
    pub fn move_to(&mut self, target: Point2D) -> MotionResult<()> {
        self.sink.move_to(target)?;
        self.position = target;
        Ok(())
    }

    /// Heading in radians, in `[0, 2pi)`
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees()
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
