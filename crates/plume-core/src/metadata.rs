//! Snapshot metadata consumed from the I/O collaborator.
//!
//! The core never parses container files. The collaborator's
//! `read_metadata` hands over this structure once per snapshot: cell
//! layouts per family, particle counts, the box size, and the unit
//! declared for each attribute.

use indexmap::IndexMap;

use crate::geometry::Aabb;
use crate::id::FamilyId;
use crate::range::IndexRange;
use crate::unit::Unit;

/// One top-level spatial cell: its bounding box and the contiguous index
/// range of particles belonging to it.
///
/// Particles are pre-sorted by cell on disk, so each cell maps to one
/// contiguous `[start, end)` range per family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Spatial extent of the cell, in box-fraction coordinates.
    pub bounds: Aabb,
    /// Index range of this cell's particles in the global ordering.
    pub particles: IndexRange,
}

/// Everything the core needs to know about a snapshot, short of the
/// per-particle arrays themselves.
#[derive(Clone, Debug, Default)]
pub struct SnapshotMetadata {
    /// Physical box size per axis. The core works in box fractions;
    /// this is carried through for the caller's rescaling.
    pub box_size: [f64; 3],
    /// Cell layout per particle family.
    pub cells: IndexMap<FamilyId, Vec<Cell>>,
    /// Total particle count per family.
    pub particle_counts: IndexMap<FamilyId, u64>,
    /// Declared physical unit per (family, attribute name).
    pub attribute_units: IndexMap<(FamilyId, String), Unit>,
}

impl SnapshotMetadata {
    /// Particle count of `family`, or `None` if the family is unknown.
    pub fn particle_count(&self, family: FamilyId) -> Option<u64> {
        self.particle_counts.get(&family).copied()
    }

    /// Cell layout of `family`, or `None` if the family is unknown.
    pub fn cells_of(&self, family: FamilyId) -> Option<&[Cell]> {
        self.cells.get(&family).map(Vec::as_slice)
    }

    /// Declared unit of an attribute, or `None` if undeclared.
    pub fn unit_of(&self, family: FamilyId, name: &str) -> Option<&Unit> {
        self.attribute_units.get(&(family, name.to_string()))
    }

    /// The families present in this snapshot, in declaration order.
    pub fn families(&self) -> impl Iterator<Item = FamilyId> + '_ {
        self.particle_counts.keys().copied()
    }
}
