//! Move Splitter
//!
//! Subdivides long linear moves into evenly spaced waypoints. A nonlinear
//! transform applied only to the endpoints of a long move would produce a
//! curved path in Cartesian space; sampling at a bounded spacing keeps the
//! deviation from the straight line small.

use polarwave_core::Point2D;

/// Most waypoints a single move is split into
pub const MAX_SUBDIVISIONS: usize = 1 << 20;

/// Waypoints strictly before `to` on the segment `from -> to`.
///
/// Produces `floor(distance / max_segment_length)` points at
/// `from + (to - from) * i / n` for `i in 0..n`. The first waypoint is `from`
/// itself and `to` is never included: the caller emits it as the final,
/// authoritative move. Moves shorter than the threshold produce nothing.
///
/// A non-finite or non-positive threshold disables splitting. The count is
/// capped at [`MAX_SUBDIVISIONS`]; beyond that the spacing grows past the
/// threshold.
pub fn split_move(from: Point2D, to: Point2D, max_segment_length: f64) -> Vec<Point2D> {
    let count = subdivisions(from, to, max_segment_length);
    (0..count)
        .map(|i| from.lerp(&to, i as f64 / count as f64))
        .collect()
}

fn subdivisions(from: Point2D, to: Point2D, max_segment_length: f64) -> usize {
    if !(max_segment_length.is_finite() && max_segment_length > 0.0) {
        return 0;
    }
    let distance = from.distance_to(&to);
    if !distance.is_finite() {
        return 0;
    }
    (distance / max_segment_length)
        .floor()
        .min(MAX_SUBDIVISIONS as f64) as usize
}

/// Splitting policy attached to a sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSplitter {
    max_segment_length: f64,
}

impl MoveSplitter {
    /// Tuned default for a polargraph with ~1.3 m anchor separation.
    pub const DEFAULT_SEGMENT_LENGTH: f64 = 5.0;

    /// Create a splitter with the given maximum segment length (mm)
    pub fn new(max_segment_length: f64) -> Self {
        Self { max_segment_length }
    }

    /// A splitter that never subdivides.
    pub fn disabled() -> Self {
        Self::new(f64::INFINITY)
    }

    pub fn max_segment_length(&self) -> f64 {
        self.max_segment_length
    }

    pub fn is_enabled(&self) -> bool {
        self.max_segment_length.is_finite() && self.max_segment_length > 0.0
    }

    /// Number of waypoints [`MoveSplitter::split`] would produce.
    pub fn subdivisions(&self, from: Point2D, to: Point2D) -> usize {
        subdivisions(from, to, self.max_segment_length)
    }

    /// See [`split_move`].
    pub fn split(&self, from: Point2D, to: Point2D) -> Vec<Point2D> {
        split_move(from, to, self.max_segment_length)
    }
}

impl Default for MoveSplitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEGMENT_LENGTH)
    }
}
