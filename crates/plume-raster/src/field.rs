//! Rasterization input: particle arrays and the projection axis.

use plume_core::RasterError;

/// The box axis a projection integrates along, or a slice cuts across.
///
/// The two in-plane axes follow in cyclic order, so the grid's row axis
/// is always the next axis after the chosen one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The first box axis.
    X,
    /// The second box axis.
    Y,
    /// The third box axis.
    Z,
}

impl Axis {
    /// Coordinate index of this axis.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Coordinate indices of the two in-plane axes, in (row, column)
    /// order: X maps to (Y, Z), Y to (Z, X), Z to (X, Y).
    pub fn in_plane(self) -> (usize, usize) {
        match self {
            Self::X => (1, 2),
            Self::Y => (2, 0),
            Self::Z => (0, 1),
        }
    }
}

/// Borrowed per-particle input arrays for one rasterization call.
///
/// `positions` are box coordinates (wrapped into the unit box per axis
/// before deposition), `smoothing` the smoothing lengths, `weights` the
/// quantity being deposited. All three share length and ordering;
/// element `i` of each describes the same particle.
#[derive(Clone, Copy, Debug)]
pub struct ParticleField<'a> {
    positions: &'a [[f64; 3]],
    smoothing: &'a [f64],
    weights: &'a [f64],
}

impl<'a> ParticleField<'a> {
    /// Bundle the three arrays, rejecting mismatched lengths.
    pub fn new(
        positions: &'a [[f64; 3]],
        smoothing: &'a [f64],
        weights: &'a [f64],
    ) -> Result<Self, RasterError> {
        if positions.len() != smoothing.len() || positions.len() != weights.len() {
            return Err(RasterError::UnsupportedGeometry {
                reason: format!(
                    "mismatched input lengths: {} positions, {} smoothing lengths, {} weights",
                    positions.len(),
                    smoothing.len(),
                    weights.len()
                ),
            });
        }
        Ok(Self {
            positions,
            smoothing,
            weights,
        })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub(crate) fn positions(&self) -> &'a [[f64; 3]] {
        self.positions
    }

    pub(crate) fn smoothing(&self) -> &'a [f64] {
        self.smoothing
    }

    pub(crate) fn weights(&self) -> &'a [f64] {
        self.weights
    }

    /// The sub-field covering particles `[start, end)`. Lengths were
    /// validated at construction, so the slices stay in step.
    pub(crate) fn chunk(&self, start: usize, end: usize) -> ParticleField<'a> {
        ParticleField {
            positions: &self.positions[start..end],
            smoothing: &self.smoothing[start..end],
            weights: &self.weights[start..end],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_are_rejected() {
        let positions = [[0.5, 0.5, 0.5]];
        let err = ParticleField::new(&positions, &[0.1, 0.2], &[1.0]).unwrap_err();
        assert!(matches!(err, RasterError::UnsupportedGeometry { .. }));
    }

    #[test]
    fn in_plane_axes_are_cyclic() {
        assert_eq!(Axis::X.in_plane(), (1, 2));
        assert_eq!(Axis::Y.in_plane(), (2, 0));
        assert_eq!(Axis::Z.in_plane(), (0, 1));
    }

    #[test]
    fn chunk_keeps_arrays_in_step() {
        let positions = [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9]];
        let smoothing = [0.1, 0.2, 0.3];
        let weights = [1.0, 2.0, 3.0];
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
        let chunk = field.chunk(1, 3);
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.positions()[0], [0.4, 0.5, 0.6]);
        assert_eq!(chunk.weights()[1], 3.0);
    }
}
