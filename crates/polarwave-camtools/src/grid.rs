//! Sample grids
//!
//! The image source abstraction consumed by the toolpath generators. Any
//! decoder can feed a generator by implementing [`IntensityGrid`]; an
//! `image::GrayImage` already does.

use image::imageops::FilterType;
use image::{GrayImage, Luma};
use polarwave_core::error::ToolpathResult;
use polarwave_core::ToolpathError;
use serde::{Deserialize, Serialize};

/// Grayscale sample grid addressed by column and row.
pub trait IntensityGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Intensity in `[0, 1]` at (`col`, `row`); 0 is black, 1 is white.
    fn intensity(&self, col: u32, row: u32) -> f64;

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl IntensityGrid for GrayImage {
    fn width(&self) -> u32 {
        image::ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        image::ImageBuffer::height(self)
    }

    fn intensity(&self, col: u32, row: u32) -> f64 {
        self.get_pixel(col, row).0[0] as f64 / 255.0
    }
}

impl<G: IntensityGrid + ?Sized> IntensityGrid for &G {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn intensity(&self, col: u32, row: u32) -> f64 {
        (**self).intensity(col, row)
    }
}

/// In-memory row-major grid of intensities
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    samples: Vec<f64>,
}

impl SampleGrid {
    /// Create a grid from row-major samples.
    ///
    /// Values are clamped into `[0, 1]`; NaN or infinite samples are
    /// rejected.
    pub fn new(width: u32, height: u32, samples: Vec<f64>) -> ToolpathResult<Self> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(ToolpathError::InvalidParameter {
                name: "samples".to_string(),
                reason: format!(
                    "expected {} samples for {}x{}, got {}",
                    expected,
                    width,
                    height,
                    samples.len()
                ),
            });
        }
        if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
            return Err(ToolpathError::InvalidParameter {
                name: "samples".to_string(),
                reason: format!("sample {} is not finite", index),
            });
        }

        Ok(Self {
            width,
            height,
            samples: samples.into_iter().map(|v| v.clamp(0.0, 1.0)).collect(),
        })
    }

    /// Create a grid by evaluating `f(col, row)` for every cell
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> ToolpathResult<Self>
    where
        F: FnMut(u32, u32) -> f64,
    {
        let samples = (0..height)
            .flat_map(|row| (0..width).map(move |col| (col, row)))
            .map(|(col, row)| f(col, row))
            .collect();
        Self::new(width, height, samples)
    }

    pub fn uniform(width: u32, height: u32, value: f64) -> ToolpathResult<Self> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }
}

impl IntensityGrid for SampleGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn intensity(&self, col: u32, row: u32) -> f64 {
        self.samples[row as usize * self.width as usize + col as usize]
    }
}

/// Resampling filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbour
    Nearest,
    /// Linear
    Triangle,
    /// Cubic (Catmull-Rom)
    #[default]
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Quantize a grid into an 8-bit grayscale image
fn to_gray<G: IntensityGrid + ?Sized>(grid: &G) -> GrayImage {
    GrayImage::from_fn(grid.width(), grid.height(), |col, row| {
        Luma([(grid.intensity(col, row).clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

/// Stretch intensities so the darkest pixel becomes 0 and the brightest 255.
///
/// A flat image is left unchanged.
pub fn autocontrast(image: &mut GrayImage) {
    let (lo, hi) = image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p.0[0]), hi.max(p.0[0])));
    if hi <= lo {
        return;
    }

    let span = (hi - lo) as f64;
    let mut lut = [0u8; 256];
    for (ix, entry) in lut.iter_mut().enumerate() {
        *entry = ((ix as f64 - lo as f64) * 255.0 / span).clamp(0.0, 255.0) as u8;
    }

    for pixel in image.pixels_mut() {
        pixel.0[0] = lut[pixel.0[0] as usize];
    }
}

/// Resample `grid` to `columns` x `rows` and apply [`autocontrast`].
///
/// Fails with `DegenerateGrid` when the source or the target has no rows or
/// no columns.
pub fn resample<G: IntensityGrid + ?Sized>(
    grid: &G,
    columns: u32,
    rows: u32,
    filter: ResampleFilter,
) -> ToolpathResult<GrayImage> {
    if grid.is_empty() {
        return Err(ToolpathError::DegenerateGrid {
            columns: grid.width(),
            rows: grid.height(),
        });
    }
    if columns == 0 || rows == 0 {
        return Err(ToolpathError::DegenerateGrid { columns, rows });
    }

    let source = to_gray(grid);
    let mut resized = image::imageops::resize(&source, columns, rows, filter.into());
    autocontrast(&mut resized);

    tracing::debug!(
        source_width = grid.width(),
        source_height = grid.height(),
        columns,
        rows,
        ?filter,
        "Resampled sample grid"
    );
    Ok(resized)
}
