//! Per-family spatial cell index.

use plume_core::{AxisConstraints, Cell, FamilyId, IndexRangeSet, MaskError};

/// The top-level cell layout of one particle family, queryable by
/// per-axis interval constraints.
///
/// Construction validates the layout invariants once, so queries never
/// re-check: cell particle ranges must be sorted by start, disjoint, and
/// form a contiguous partition of `[0, particle_count)`.
#[derive(Clone, Debug)]
pub struct CellIndex {
    cells: Vec<Cell>,
    particle_count: u64,
}

impl CellIndex {
    /// Build an index from a family's cell metadata.
    ///
    /// Fails with [`MaskError::InvalidCellLayout`] if the cell ranges are
    /// unsorted, overlapping, gapped, or do not cover exactly
    /// `particle_count` particles.
    pub fn new(family: FamilyId, cells: &[Cell], particle_count: u64) -> Result<Self, MaskError> {
        let mut expected_start = 0u64;
        for (i, cell) in cells.iter().enumerate() {
            if cell.particles.start > cell.particles.end {
                return Err(MaskError::InvalidCellLayout {
                    family,
                    reason: format!("cell {i} has inverted range {}", cell.particles),
                });
            }
            if cell.particles.start != expected_start {
                return Err(MaskError::InvalidCellLayout {
                    family,
                    reason: format!(
                        "cell {i} starts at {} but the previous cell ends at {expected_start}",
                        cell.particles.start
                    ),
                });
            }
            expected_start = cell.particles.end;
        }
        if expected_start != particle_count {
            return Err(MaskError::InvalidCellLayout {
                family,
                reason: format!(
                    "cells cover {expected_start} of {particle_count} particles"
                ),
            });
        }
        Ok(Self {
            cells: cells.to_vec(),
            particle_count,
        })
    }

    /// Total particle count of the indexed family.
    pub fn particle_count(&self) -> u64 {
        self.particle_count
    }

    /// Number of cells in the layout.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Select the particle ranges of every cell overlapping the
    /// constraints.
    ///
    /// Each axis is tested independently; a `None` constraint always
    /// passes, and a cell is selected iff all three axes pass. Overlap is
    /// inclusive at cell edges: a cell touching the constraint only on
    /// its boundary is selected (conservative, over-inclusive — callers
    /// needing exact geometry refine with per-particle coordinate tests).
    ///
    /// Emitted ranges are already sorted by construction, so a single
    /// left-to-right merge pass keeps the result minimal. O(cells);
    /// unconstrained queries return exactly one range covering the whole
    /// family.
    pub fn query(&self, constraints: &AxisConstraints) -> IndexRangeSet {
        let mut out = IndexRangeSet::empty();
        'cells: for cell in &self.cells {
            for (axis, constraint) in constraints.iter().enumerate() {
                if let Some(interval) = constraint {
                    if !cell.bounds.overlaps_axis(axis, interval) {
                        continue 'cells;
                    }
                }
            }
            out.push(cell.particles);
        }
        out
    }
}
