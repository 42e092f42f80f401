//! Recording decorator
//!
//! Wraps any sink and captures the Cartesian stroke stream for external
//! preview renderers, independent of the coordinate space the wrapped sink
//! emits. The decorator tracks its own position; it never reads the
//! delegate's.

use crate::command::CommandLog;
use crate::sink::KinematicsSink;
use polarwave_core::error::MotionResult;
use polarwave_core::Point2D;
use serde::{Deserialize, Serialize};

/// Types of recorded strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    /// Pen down
    Draw,
    /// Pen up
    Travel,
}

/// A single Cartesian stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedStroke {
    pub kind: StrokeKind,
    pub start: Point2D,
    pub end: Point2D,
}

impl RecordedStroke {
    pub fn is_draw(&self) -> bool {
        self.kind == StrokeKind::Draw
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Drawn strokes mapped into raster image space.
///
/// The image y axis points down; the bounding box always contains the
/// origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    /// Image width in pixels, border included
    pub width: u32,
    /// Image height in pixels, border included
    pub height: u32,
    /// Stroke width in pixels
    pub line_width: f64,
    /// Draw strokes in pixel coordinates
    pub lines: Vec<(Point2D, Point2D)>,
}

/// Sink decorator that records every accepted move as a stroke
#[derive(Debug, Clone)]
pub struct RecordingDecorator<S> {
    inner: S,
    position: Point2D,
    strokes: Vec<RecordedStroke>,
}

impl<S: KinematicsSink> RecordingDecorator<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            position: Point2D::ORIGIN,
            strokes: Vec::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn strokes(&self) -> &[RecordedStroke] {
        &self.strokes
    }

    /// Draw strokes only.
    pub fn drawn(&self) -> impl Iterator<Item = &RecordedStroke> {
        self.strokes.iter().filter(|s| s.is_draw())
    }

    /// Total pen-down distance in mm.
    pub fn drawn_length(&self) -> f64 {
        self.drawn().map(RecordedStroke::length).sum()
    }

    /// Consecutive draw strokes joined into polylines.
    ///
    /// A stroke continues the current polyline when it starts exactly where
    /// the previous one ended; anything else starts a new polyline.
    pub fn drawn_polylines(&self) -> Vec<Vec<Point2D>> {
        let mut polylines: Vec<Vec<Point2D>> = Vec::new();
        for stroke in self.drawn() {
            match polylines.last_mut() {
                Some(line) if line.last() == Some(&stroke.start) => line.push(stroke.end),
                _ => polylines.push(vec![stroke.start, stroke.end]),
            }
        }
        polylines
    }

    /// Map the drawn strokes into a raster of `pixels_per_mm` resolution
    /// with `border_px` extra pixels on each axis. Strokes are
    /// `line_thickness_mm` wide.
    pub fn preview_layout(
        &self,
        pixels_per_mm: f64,
        line_thickness_mm: f64,
        border_px: u32,
    ) -> PreviewLayout {
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        for stroke in self.drawn() {
            for p in [stroke.start, stroke.end] {
                min_x = min_x.min(p.x);
                max_x = max_x.max(p.x);
                min_y = min_y.min(p.y);
                max_y = max_y.max(p.y);
            }
        }

        let to_image = |p: Point2D| {
            Point2D::new(
                (p.x - min_x) * pixels_per_mm,
                (max_y - p.y) * pixels_per_mm,
            )
        };

        PreviewLayout {
            width: ((max_x - min_x) * pixels_per_mm) as u32 + border_px,
            height: ((max_y - min_y) * pixels_per_mm) as u32 + border_px,
            line_width: line_thickness_mm * pixels_per_mm,
            lines: self
                .drawn()
                .map(|s| (to_image(s.start), to_image(s.end)))
                .collect(),
        }
    }

    fn record(&mut self, kind: StrokeKind, to: Point2D) {
        self.strokes.push(RecordedStroke {
            kind,
            start: self.position,
            end: to,
        });
        self.position = to;
    }
}

impl<S: KinematicsSink> KinematicsSink for RecordingDecorator<S> {
    fn move_to(&mut self, to: Point2D) -> MotionResult<()> {
        self.inner.move_to(to)?;
        self.record(StrokeKind::Draw, to);
        Ok(())
    }

    fn travel_to(&mut self, to: Point2D) -> MotionResult<()> {
        self.inner.travel_to(to)?;
        self.record(StrokeKind::Travel, to);
        Ok(())
    }

    fn command_log(&self) -> &CommandLog {
        self.inner.command_log()
    }

    fn position(&self) -> Point2D {
        self.position
    }
}
