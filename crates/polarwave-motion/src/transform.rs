//! Kinematic transforms
//!
//! Maps Cartesian targets to the coordinate space native to the mechanism.
//!
//! For a polargraph the pen hangs from two cables anchored at A and B. The
//! actuator coordinate of each anchor is how far its cable is retracted
//! relative to the home position (0, 0), where both cables hang at their
//! nominal length:
//!
//! ```text
//!   A ----------- B        A = (-s/2, h), B = (s/2, h)
//!    \           /         h = sqrt(L^2 - (s/2)^2)
//!     \         /
//!      \       /           a = L - |A - p|
//!       \     /            b = L - |B - p|
//!        \   /
//!         (p)
//! ```
//!
//! Negative values are valid: they mean the cable is paid out beyond its
//! home length to reach a point lower on the canvas. Only targets on or
//! above the anchor line are physically unreachable, since a cable cannot
//! push.

use polarwave_core::error::MotionResult;
use polarwave_core::{ActuatorCoords, GeometryError, MotionError, Point2D};
use serde::{Deserialize, Serialize};

/// Mapping between Cartesian planning space and actuator space.
pub trait KinematicsTransform {
    /// Actuator coordinates for a Cartesian target.
    fn to_actuator(&self, target: Point2D) -> ActuatorCoords;

    /// Inverse of [`KinematicsTransform::to_actuator`].
    fn to_cartesian(&self, coords: ActuatorCoords) -> Point2D;

    /// Rejects targets the mechanism cannot physically reach.
    fn check_reachable(&self, target: Point2D) -> MotionResult<()> {
        ensure_finite(target)
    }
}

pub(crate) fn ensure_finite(target: Point2D) -> MotionResult<()> {
    if target.is_finite() {
        Ok(())
    } else {
        Err(MotionError::NonFiniteTarget {
            x: target.x,
            y: target.y,
        })
    }
}

/// Direct Cartesian plotters: axis positions equal the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityTransform;

impl KinematicsTransform for IdentityTransform {
    fn to_actuator(&self, target: Point2D) -> ActuatorCoords {
        ActuatorCoords::new(target.x, target.y)
    }

    fn to_cartesian(&self, coords: ActuatorCoords) -> Point2D {
        Point2D::new(coords.a, coords.b)
    }
}

/// Geometry of a two-cable suspended plotter.
///
/// Immutable once constructed; the anchor height is derived at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryParameters", into = "GeometryParameters")]
pub struct PolargraphGeometry {
    anchor_separation: f64,
    cable_length: f64,
    max_feedrate: f64,
    anchor_height: f64,
}

/// Serialized form of [`PolargraphGeometry`]; validated on conversion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GeometryParameters {
    anchor_separation: f64,
    cable_length: f64,
    max_feedrate: f64,
}

impl TryFrom<GeometryParameters> for PolargraphGeometry {
    type Error = GeometryError;

    fn try_from(p: GeometryParameters) -> Result<Self, Self::Error> {
        Self::new(p.anchor_separation, p.cable_length, p.max_feedrate)
    }
}

impl From<PolargraphGeometry> for GeometryParameters {
    fn from(g: PolargraphGeometry) -> Self {
        Self {
            anchor_separation: g.anchor_separation,
            cable_length: g.cable_length,
            max_feedrate: g.max_feedrate,
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), GeometryError> {
    if !value.is_finite() {
        return Err(GeometryError::InvalidParameter {
            name: name.to_string(),
            reason: format!("{} is not finite", value),
        });
    }
    if value <= 0.0 {
        return Err(GeometryError::InvalidParameter {
            name: name.to_string(),
            reason: format!("must be > 0, got {}", value),
        });
    }
    Ok(())
}

impl PolargraphGeometry {
    /// Create a new geometry.
    ///
    /// * `anchor_separation` - horizontal distance between the two anchors (mm)
    /// * `cable_length` - cable length from each anchor to the home position (mm)
    /// * `max_feedrate` - feedrate limit written to the preamble
    pub fn new(
        anchor_separation: f64,
        cable_length: f64,
        max_feedrate: f64,
    ) -> Result<Self, GeometryError> {
        require_positive("anchor_separation", anchor_separation)?;
        require_positive("cable_length", cable_length)?;
        require_positive("max_feedrate", max_feedrate)?;

        let half = anchor_separation / 2.0;
        if cable_length <= half {
            return Err(GeometryError::CableTooShort {
                cable_length,
                anchor_separation,
            });
        }

        Ok(Self {
            anchor_separation,
            cable_length,
            max_feedrate,
            anchor_height: (cable_length * cable_length - half * half).sqrt(),
        })
    }

    pub fn anchor_separation(&self) -> f64 {
        self.anchor_separation
    }

    pub fn cable_length(&self) -> f64 {
        self.cable_length
    }

    pub fn max_feedrate(&self) -> f64 {
        self.max_feedrate
    }

    /// Height of both anchors above the home position.
    pub fn anchor_height(&self) -> f64 {
        self.anchor_height
    }

    /// Left anchor.
    pub fn anchor_a(&self) -> Point2D {
        Point2D::new(-self.anchor_separation / 2.0, self.anchor_height)
    }

    /// Right anchor.
    pub fn anchor_b(&self) -> Point2D {
        Point2D::new(self.anchor_separation / 2.0, self.anchor_height)
    }
}

impl KinematicsTransform for PolargraphGeometry {
    fn to_actuator(&self, target: Point2D) -> ActuatorCoords {
        ActuatorCoords::new(
            self.cable_length - self.anchor_a().distance_to(&target),
            self.cable_length - self.anchor_b().distance_to(&target),
        )
    }

    fn to_cartesian(&self, coords: ActuatorCoords) -> Point2D {
        let s = self.anchor_separation;
        let da = self.cable_length - coords.a;
        let db = self.cable_length - coords.b;

        // Intersection of the two cable circles, taking the solution below the anchors.
        let x = (da * da - db * db) / (2.0 * s);
        let dx = x + s / 2.0;
        let drop = (da * da - dx * dx).max(0.0).sqrt();
        Point2D::new(x, self.anchor_height - drop)
    }

    fn check_reachable(&self, target: Point2D) -> MotionResult<()> {
        ensure_finite(target)?;
        if target.y >= self.anchor_height {
            return Err(MotionError::UnreachableTarget {
                x: target.x,
                y: target.y,
                reason: format!(
                    "at or above the anchor line (y = {:.3})",
                    self.anchor_height
                ),
            });
        }
        Ok(())
    }
}
