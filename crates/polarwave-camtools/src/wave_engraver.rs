//! Wave Engraving Tool
//!
//! Renders a grayscale grid as one continuous boustrophedon stroke inside a
//! square frame. Each scan line wiggles up and down across adjacent columns
//! with an amplitude proportional to the darkness of the sampled pixel.
//! Grid row 0 is the top of the image; frame y increases upward.

use crate::grid::{resample, IntensityGrid, ResampleFilter};
use image::GrayImage;
use polarwave_core::error::ToolpathResult;
use polarwave_core::{Point2D, ToolpathError};
use polarwave_motion::KinematicsSink;
use serde::{Deserialize, Serialize};

/// Wave engraving parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParameters {
    /// Vertical pitch of one scan line in mm; the deflection never exceeds half of it
    pub line_height: f64,
    /// Half the side of the square frame, centered on the origin
    pub frame_half_width: f64,
    /// Horizontal length of one wave segment in mm
    pub line_segment_length: f64,
    /// Filter used when resampling the source to the scan grid
    pub resample_filter: ResampleFilter,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            line_height: 12.0,
            frame_half_width: 282.0,
            line_segment_length: 1.0,
            resample_filter: ResampleFilter::CatmullRom,
        }
    }
}

fn require_positive(name: &str, value: f64) -> ToolpathResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ToolpathError::InvalidParameter {
            name: name.to_string(),
            reason: format!("must be a positive finite number, got {}", value),
        })
    }
}

impl WaveParameters {
    /// Largest number of rows or columns the scan grid may have
    pub const MAX_GRID_DIMENSION: u32 = 1 << 16;
    /// Largest number of cells the scan grid may have
    pub const MAX_GRID_CELLS: u64 = 1 << 26;

    pub fn validate(&self) -> ToolpathResult<()> {
        require_positive("line_height", self.line_height)?;
        require_positive("frame_half_width", self.frame_half_width)?;
        require_positive("line_segment_length", self.line_segment_length)?;

        let rows = self.rows();
        let columns = self.columns();
        let max = Self::MAX_GRID_DIMENSION as f64;
        if rows > max {
            return Err(ToolpathError::InvalidParameter {
                name: "line_height".to_string(),
                reason: format!("grid would have {} rows, at most {} allowed", rows, max),
            });
        }
        if columns > max {
            return Err(ToolpathError::InvalidParameter {
                name: "line_segment_length".to_string(),
                reason: format!("grid would have {} columns, at most {} allowed", columns, max),
            });
        }
        if rows * columns > Self::MAX_GRID_CELLS as f64 {
            return Err(ToolpathError::InvalidParameter {
                name: "frame_half_width".to_string(),
                reason: format!(
                    "grid would have {} cells, at most {} allowed",
                    rows * columns,
                    Self::MAX_GRID_CELLS
                ),
            });
        }
        Ok(())
    }

    fn rows(&self) -> f64 {
        2.0 * (2.0 * self.frame_half_width / self.line_height).floor()
    }

    fn columns(&self) -> f64 {
        (2.0 * self.frame_half_width / self.line_segment_length).floor()
    }

    /// Number of grid rows; always even, two rows per scan line.
    ///
    /// Saturates for parameters that [`WaveParameters::validate`] rejects.
    pub fn line_count(&self) -> u32 {
        self.rows() as u32
    }

    /// Number of grid columns.
    pub fn segment_count(&self) -> u32 {
        self.columns() as u32
    }
}

/// Counts reported after a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WaveSummary {
    /// Grid rows (two per scan line)
    pub lines: u32,
    /// Grid columns
    pub segments: u32,
    /// Pen-down moves issued
    pub moves: usize,
    /// Pen-up moves issued
    pub travels: usize,
}

impl WaveSummary {
    /// Number of scan lines drawn.
    pub fn scan_lines(&self) -> u32 {
        self.lines / 2
    }
}

/// Counts moves on their way to the sink
struct Emitter<'a, S: ?Sized> {
    sink: &'a mut S,
    moves: usize,
    travels: usize,
}

impl<S: KinematicsSink + ?Sized> Emitter<'_, S> {
    fn move_to(&mut self, x: f64, y: f64) -> ToolpathResult<()> {
        self.sink.move_to(Point2D::new(x, y))?;
        self.moves += 1;
        Ok(())
    }

    fn travel_to(&mut self, x: f64, y: f64) -> ToolpathResult<()> {
        self.sink.travel_to(Point2D::new(x, y))?;
        self.travels += 1;
        Ok(())
    }
}

/// Wave toolpath generator
#[derive(Debug, Clone)]
pub struct WaveToolpathGenerator {
    params: WaveParameters,
}

impl WaveToolpathGenerator {
    pub fn new(params: WaveParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &WaveParameters {
        &self.params
    }

    /// Frame coordinates of grid cell (`col`, `row`)
    fn map(&self, col: f64, row: f64, columns: u32, rows: u32) -> (f64, f64) {
        let r = self.params.frame_half_width;
        let w = columns as f64;
        let h = rows as f64;
        (
            (col / w - 0.5) * 2.0 * r,
            ((h - row) / h - 0.5) * 2.0 * r,
        )
    }

    /// Generate the toolpath for `grid` into `sink`
    pub fn generate<G, S>(&self, grid: &G, sink: &mut S) -> ToolpathResult<WaveSummary>
    where
        G: IntensityGrid + ?Sized,
        S: KinematicsSink + ?Sized,
    {
        self.generate_with_progress(grid, sink, |_| {})
    }

    /// Generate the toolpath with a progress callback in `[0, 1]`.
    ///
    /// Parameters and grid size are checked before anything reaches the sink.
    pub fn generate_with_progress<G, S, F>(
        &self,
        grid: &G,
        sink: &mut S,
        mut progress_callback: F,
    ) -> ToolpathResult<WaveSummary>
    where
        G: IntensityGrid + ?Sized,
        S: KinematicsSink + ?Sized,
        F: FnMut(f32),
    {
        self.params.validate()?;
        let rows = self.params.line_count();
        let columns = self.params.segment_count();
        let image = resample(grid, columns, rows, self.params.resample_filter)?;

        tracing::debug!(
            columns,
            rows,
            line_height = self.params.line_height,
            frame_half_width = self.params.frame_half_width,
            "Sized wave grid"
        );
        progress_callback(0.0);

        let mut out = Emitter {
            sink,
            moves: 0,
            travels: 0,
        };
        self.draw_border(&mut out)?;
        progress_callback(0.05);

        let scan_lines = rows / 2;
        for (line, yi) in (0..rows).step_by(2).enumerate() {
            self.draw_scan_line(&mut out, &image, yi)?;
            progress_callback(0.05 + (line + 1) as f32 / scan_lines as f32 * 0.95);
        }

        let summary = WaveSummary {
            lines: rows,
            segments: columns,
            moves: out.moves,
            travels: out.travels,
        };
        tracing::info!(
            lines = summary.lines,
            segments = summary.segments,
            moves = summary.moves,
            travels = summary.travels,
            "Generated wave toolpath"
        );
        progress_callback(1.0);
        Ok(summary)
    }

    /// Square frame around the drawing; the pen ends at the top-left corner.
    fn draw_border<S: KinematicsSink + ?Sized>(&self, out: &mut Emitter<'_, S>) -> ToolpathResult<()> {
        let r = self.params.frame_half_width;
        out.travel_to(0.0, 0.0)?;
        out.travel_to(r, 0.0)?;
        for (x, y) in [(r, r), (-r, r), (-r, -r), (r, -r), (r, r), (-r, r)] {
            out.move_to(x, y)?;
        }
        Ok(())
    }

    fn draw_scan_line<S: KinematicsSink + ?Sized>(
        &self,
        out: &mut Emitter<'_, S>,
        image: &GrayImage,
        yi: u32,
    ) -> ToolpathResult<()> {
        let r = self.params.frame_half_width;
        let half = self.params.line_height / 2.0;
        let (columns, rows) = image.dimensions();

        for xi in 0..columns {
            // odd columns read the lower row of the pair
            let value = image.get_pixel(xi, yi + xi % 2).0[0] as f64;
            let darkness = 1.0 - value / 255.0;
            let (x, y) = self.map(xi as f64, yi as f64, columns, rows);
            let offset = if xi % 2 == 0 {
                darkness * half
            } else {
                -darkness * half
            };
            out.move_to(x, y - half + offset)?;
        }

        // run out to the frame edge, then back along the top to the next line
        let (_, line_y) = self.map(columns as f64, yi as f64, columns, rows);
        out.move_to(r, line_y - half)?;
        out.move_to(r, r)?;
        out.move_to(-r, r)?;
        let (x, y) = self.map(0.0, (yi + 1) as f64, columns, rows);
        out.move_to(x, y)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SampleGrid;
    use polarwave_motion::DirectCartesianSink;

    fn small_params() -> WaveParameters {
        WaveParameters {
            line_height: 4.0,
            frame_half_width: 10.0,
            line_segment_length: 1.0,
            resample_filter: ResampleFilter::Nearest,
        }
    }

    #[test]
    fn test_default_parameters() {
        let params = WaveParameters::default();
        assert_eq!(params.line_height, 12.0);
        assert_eq!(params.frame_half_width, 282.0);
        assert_eq!(params.line_segment_length, 1.0);
        assert_eq!(params.resample_filter, ResampleFilter::CatmullRom);
        assert_eq!(params.line_count(), 94);
        assert_eq!(params.segment_count(), 564);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let mut params = small_params();
        params.line_height = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ToolpathError::InvalidParameter { ref name, .. }) if name == "line_height"
        ));

        let mut params = small_params();
        params.line_segment_length = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let params = WaveParameters {
            line_height: 1.0,
            frame_half_width: 1.1e9,
            ..small_params()
        };
        assert_eq!(params.line_count(), u32::MAX);
        assert!(matches!(
            params.validate(),
            Err(ToolpathError::InvalidParameter { ref name, .. }) if name == "line_height"
        ));

        let params = WaveParameters {
            line_segment_length: 1e-6,
            ..WaveParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ToolpathError::InvalidParameter { ref name, .. }) if name == "line_segment_length"
        ));

        // both axes in range, too many cells in total
        let params = WaveParameters {
            line_height: 0.04,
            frame_half_width: 500.0,
            line_segment_length: 0.02,
            resample_filter: ResampleFilter::Nearest,
        };
        assert!(params.line_count() <= WaveParameters::MAX_GRID_DIMENSION);
        assert!(params.segment_count() <= WaveParameters::MAX_GRID_DIMENSION);
        assert!(matches!(
            params.validate(),
            Err(ToolpathError::InvalidParameter { ref name, .. }) if name == "frame_half_width"
        ));
    }

    #[test]
    fn test_oversized_grid_emits_nothing() {
        let grid = SampleGrid::uniform(4, 4, 0.5).unwrap();
        let mut sink = DirectCartesianSink::new();
        let params = WaveParameters {
            line_height: 1.0,
            frame_half_width: 1.1e9,
            ..small_params()
        };

        let err = WaveToolpathGenerator::new(params)
            .generate(&grid, &mut sink)
            .unwrap_err();
        assert!(matches!(err, ToolpathError::InvalidParameter { .. }));
        assert_eq!(sink.command_log().motion_count(), 0);
    }

    #[test]
    fn test_small_grid_counts() {
        let grid = SampleGrid::uniform(4, 4, 0.5).unwrap();
        let mut sink = DirectCartesianSink::new();
        let summary = WaveToolpathGenerator::new(small_params())
            .generate(&grid, &mut sink)
            .unwrap();

        assert_eq!(summary.lines, 10);
        assert_eq!(summary.segments, 20);
        assert_eq!(summary.scan_lines(), 5);
        assert_eq!(summary.moves, 126);
        assert_eq!(summary.travels, 2);
        assert_eq!(sink.command_log().motion_count(), 128);
    }

    #[test]
    fn test_border_comes_first() {
        let grid = SampleGrid::uniform(4, 4, 1.0).unwrap();
        let mut sink = DirectCartesianSink::new();
        WaveToolpathGenerator::new(small_params())
            .generate(&grid, &mut sink)
            .unwrap();

        let positions = sink.command_log().positions();
        let expected = [
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (-10.0, 10.0),
            (-10.0, -10.0),
            (10.0, -10.0),
            (10.0, 10.0),
            (-10.0, 10.0),
        ];
        for (got, want) in positions.iter().take(8).zip(expected) {
            assert_eq!((got.a, got.b), want);
        }
    }

    #[test]
    fn test_first_scan_line_geometry() {
        // a flat grid stays flat through autocontrast, white means no wiggle
        let grid = SampleGrid::uniform(3, 3, 1.0).unwrap();
        let mut sink = DirectCartesianSink::new();
        WaveToolpathGenerator::new(small_params())
            .generate(&grid, &mut sink)
            .unwrap();

        let positions = sink.command_log().positions();
        // first scan point sits at the top-left, half a line below the top
        let first = positions[8];
        assert!((first.a - -10.0).abs() < 1e-12);
        assert!((first.b - 8.0).abs() < 1e-12);
        // the line ends at the right frame edge
        let end = positions[8 + 20];
        assert!((end.a - 10.0).abs() < 1e-12);
        assert!((end.b - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_grid_emits_nothing() {
        let grid = SampleGrid::uniform(4, 4, 0.5).unwrap();
        let mut params = small_params();
        params.line_height = 30.0;
        let mut sink = DirectCartesianSink::new();

        let err = WaveToolpathGenerator::new(params)
            .generate(&grid, &mut sink)
            .unwrap_err();
        assert_eq!(
            err,
            ToolpathError::DegenerateGrid {
                columns: 20,
                rows: 0
            }
        );
        assert_eq!(sink.command_log().motion_count(), 0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let grid = SampleGrid::uniform(4, 4, 0.5).unwrap();
        let mut sink = DirectCartesianSink::new();
        let mut seen = Vec::new();
        WaveToolpathGenerator::new(small_params())
            .generate_with_progress(&grid, &mut sink, |p| seen.push(p))
            .unwrap();

        assert_eq!(seen.first(), Some(&0.0));
        assert_eq!(seen.last(), Some(&1.0));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
