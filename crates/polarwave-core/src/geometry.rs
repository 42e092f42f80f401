//! Planar value types
//!
//! All lengths are in millimeters. Cartesian space has its origin at the
//! plotter's home position with +y pointing up towards the anchors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in Cartesian planning space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// The home position.
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Creates a new point with the given X and Y coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        Point2D::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Reflection across the vertical axis (x = 0).
    pub fn mirror_x(&self) -> Point2D {
        Point2D::new(-self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A coordinate pair in actuator space.
///
/// For a polargraph `a` and `b` are the cable retraction of the left and
/// right anchor relative to the home length. For a direct plotter they are
/// simply the X and Y axis positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActuatorCoords {
    pub a: f64,
    pub b: f64,
}

impl ActuatorCoords {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Swaps the two actuators, which is what mirroring a target across the
    /// symmetry axis of the mechanism does.
    pub fn swapped(&self) -> ActuatorCoords {
        ActuatorCoords::new(self.b, self.a)
    }
}
