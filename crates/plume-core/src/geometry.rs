//! Geometry primitives: closed intervals and axis-aligned boxes.
//!
//! All coordinates are in box-fraction units: the snapshot volume is the
//! unit cube `[0, 1)³` and the outer layer owns the rescaling to
//! physical lengths.

use crate::error::MaskError;

/// A closed interval `[lo, hi]` on one axis.
///
/// Construction validates the bounds, so a held `Interval` is always
/// well-formed and downstream code never re-checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Create an interval, rejecting `lo > hi` and non-finite bounds
    /// with [`MaskError::InvalidConstraint`] before any I/O happens.
    pub fn new(lo: f64, hi: f64) -> Result<Self, MaskError> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(MaskError::InvalidConstraint { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound (inclusive).
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound (inclusive).
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Whether `value` lies in `[lo, hi]`, inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

/// Per-axis interval constraints; `None` leaves an axis unconstrained.
pub type AxisConstraints = [Option<Interval>; 3];

/// An axis-aligned bounding box in 3-D box-fraction coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner per axis.
    pub min: [f64; 3],
    /// Maximum corner per axis.
    pub max: [f64; 3],
}

impl Aabb {
    /// Create a box from its two corners.
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Whether this box overlaps `interval` on the given axis.
    ///
    /// Inclusive at both cell edges: a box touching the interval only on
    /// its boundary counts as overlapping. This is the conservative
    /// tie-break for cells straddling a constraint — over-inclusion is
    /// refined later by exact per-particle tests, never the reverse.
    pub fn overlaps_axis(&self, axis: usize, interval: &Interval) -> bool {
        self.min[axis] <= interval.hi() && interval.lo() <= self.max[axis]
    }
}
