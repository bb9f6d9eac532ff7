//! The accumulation target and periodic pixel arithmetic.

use plume_core::RasterError;

/// A dense square grid of f64 accumulators over the unit square.
///
/// Pixel `(row, col)` covers `[row/n, (row+1)/n) x [col/n, (col+1)/n)`
/// with its center at `((row+0.5)/n, (col+0.5)/n)`; the row axis is the
/// first in-plane axis of the rasterization call. Values are plain
/// sums of depositions; rescaling to physical units is the caller's
/// business.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    resolution: u32,
    pixels: Vec<f64>,
}

impl PixelGrid {
    pub(crate) fn new(resolution: u32) -> Result<Self, RasterError> {
        if resolution == 0 {
            return Err(RasterError::UnsupportedGeometry {
                reason: "resolution must be at least 1".to_string(),
            });
        }
        Ok(Self {
            resolution,
            pixels: vec![0.0; resolution as usize * resolution as usize],
        })
    }

    /// Grid side length in pixels.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// All pixel values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.pixels
    }

    /// The accumulated value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn value(&self, row: u32, col: u32) -> f64 {
        assert!(row < self.resolution && col < self.resolution);
        self.pixels[row as usize * self.resolution as usize + col as usize]
    }

    /// Sum of all pixels. Projection conserves the deposited total, so
    /// this equals the sum of `weight / h^2` over the particles.
    pub fn total(&self) -> f64 {
        self.pixels.iter().sum()
    }

    pub(crate) fn add(&mut self, row: usize, col: usize, value: f64) {
        self.pixels[row * self.resolution as usize + col] += value;
    }

    /// Elementwise merge of a partial grid of the same resolution.
    pub(crate) fn merge(&mut self, other: &PixelGrid) {
        debug_assert_eq!(self.resolution, other.resolution);
        for (dst, src) in self.pixels.iter_mut().zip(&other.pixels) {
            *dst += src;
        }
    }
}

/// Wrap a box coordinate into `[0, 1)`.
///
/// `rem_euclid` alone can round a tiny negative input up to exactly
/// 1.0, which would land outside the last pixel.
pub(crate) fn wrap_unit(x: f64) -> f64 {
    let wrapped = x.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Candidate pixel span whose centers can lie within `radius` of
/// `center`, as raw (possibly negative or overflowing) indices.
///
/// The upper bound is capped so the span never exceeds one full period:
/// with the footprint clamped to half the box the only index it can
/// drop is a wrapped duplicate of the lower bound.
pub(crate) fn pixel_span(center: f64, radius: f64, resolution: usize) -> (i64, i64) {
    let n = resolution as f64;
    let lo = ((center - radius) * n - 0.5).ceil() as i64;
    let hi = ((center + radius) * n - 0.5).floor() as i64;
    (lo, hi.min(lo + resolution as i64 - 1))
}

/// Center coordinate of raw pixel index `j` in box units.
pub(crate) fn pixel_center(j: i64, resolution: usize) -> f64 {
    (j as f64 + 0.5) / resolution as f64
}

/// Wrap a raw pixel index into `[0, resolution)`.
pub(crate) fn wrap_pixel(j: i64, resolution: usize) -> usize {
    j.rem_euclid(resolution as i64) as usize
}

/// Index of the pixel containing box coordinate `x` in `[0, 1)`.
pub(crate) fn containing_pixel(x: f64, resolution: usize) -> usize {
    ((x * resolution as f64) as usize).min(resolution - 1)
}
