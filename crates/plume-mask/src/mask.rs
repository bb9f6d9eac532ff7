//! The mask session object: spatial ∩ property selection per family.

use indexmap::IndexMap;

use plume_core::{
    AxisConstraints, FamilyId, IndexRange, IndexRangeSet, Interval, MaskError, MaskInstanceId,
    SelectionVersion, SnapshotMetadata,
};

use crate::cell_index::CellIndex;

/// Cache-invalidation key for one family's selection state.
///
/// Combines the mask's process-unique instance ID with the family's
/// monotonically bumped selection version: an attribute materialized
/// under one fingerprint is never served under another, and any
/// constrain call produces a fresh fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskFingerprint {
    /// Identity of the owning mask session.
    pub mask: MaskInstanceId,
    /// Version of the family's selection within that session.
    pub version: SelectionVersion,
}

/// One family's live selection.
#[derive(Clone, Debug)]
struct FamilySelection {
    index: CellIndex,
    selection: IndexRangeSet,
    version: SelectionVersion,
}

/// A query session's selection state over all particle families.
///
/// Created once per session from the snapshot metadata with every family
/// fully selected, then progressively narrowed by
/// [`constrain_spatial`](Mask::constrain_spatial) and
/// [`constrain_property`](Mask::constrain_property) — each call
/// intersects with the current state and never widens it. The attribute
/// store and the rasterizer consume the mask read-only.
///
/// A mask must be exclusively owned by the thread driving the session
/// while it is being constrained; a finalized mask is safe to share
/// across threads for read-only queries.
#[derive(Clone, Debug)]
pub struct Mask {
    id: MaskInstanceId,
    families: IndexMap<FamilyId, FamilySelection>,
}

impl Mask {
    /// Create a mask selecting every particle of every family.
    ///
    /// Validates each family's cell layout once up front (see
    /// [`CellIndex::new`]).
    pub fn new(metadata: &SnapshotMetadata) -> Result<Self, MaskError> {
        let mut families = IndexMap::new();
        for family in metadata.families() {
            let count = metadata
                .particle_count(family)
                .ok_or(MaskError::UnknownFamily { family })?;
            let cells = metadata
                .cells_of(family)
                .ok_or(MaskError::UnknownFamily { family })?;
            let index = CellIndex::new(family, cells, count)?;
            families.insert(
                family,
                FamilySelection {
                    index,
                    selection: IndexRangeSet::full(count),
                    version: SelectionVersion::default(),
                },
            );
        }
        Ok(Self {
            id: MaskInstanceId::next(),
            families,
        })
    }

    /// Process-unique identity of this mask session.
    pub fn instance_id(&self) -> MaskInstanceId {
        self.id
    }

    /// The families this mask tracks, in metadata order.
    pub fn families(&self) -> impl Iterator<Item = FamilyId> + '_ {
        self.families.keys().copied()
    }

    /// Narrow `family`'s selection to cells overlapping `constraints`.
    ///
    /// Intersects the current selection with the cell-index query, so
    /// repeated calls are monotonically non-increasing. No particle
    /// arrays are read.
    pub fn constrain_spatial(
        &mut self,
        family: FamilyId,
        constraints: &AxisConstraints,
    ) -> Result<(), MaskError> {
        let sel = self
            .families
            .get_mut(&family)
            .ok_or(MaskError::UnknownFamily { family })?;
        let hit = sel.index.query(constraints);
        sel.selection = sel.selection.intersect(&hit);
        sel.version = sel.version.bumped();
        Ok(())
    }

    /// Narrow `family`'s selection to particles whose property value
    /// lies in `[low, high]`, inclusive on both bounds.
    ///
    /// `values` must be materialized over exactly the current selection
    /// (one value per selected particle, in ascending global-index
    /// order); anything else is a
    /// [`MaskError::SelectionLengthMismatch`] — you cannot
    /// property-filter on data you have not yet decided, spatially, that
    /// you need. The refined selection is re-expressed as a finer range
    /// set by merging consecutive selected positions, so spatial and
    /// property constraints keep composing in any order.
    pub fn constrain_property(
        &mut self,
        family: FamilyId,
        values: &[f64],
        low: f64,
        high: f64,
    ) -> Result<(), MaskError> {
        let interval = Interval::new(low, high)?;
        let sel = self
            .families
            .get_mut(&family)
            .ok_or(MaskError::UnknownFamily { family })?;
        let expected = sel.selection.count();
        if values.len() as u64 != expected {
            return Err(MaskError::SelectionLengthMismatch {
                expected,
                got: values.len() as u64,
            });
        }
        let mut refined = IndexRangeSet::empty();
        let mut pos = 0usize;
        for range in sel.selection.ranges() {
            for index in range.start..range.end {
                if interval.contains(values[pos]) {
                    refined.push(IndexRange::new(index, index + 1));
                }
                pos += 1;
            }
        }
        sel.selection = refined;
        sel.version = sel.version.bumped();
        Ok(())
    }

    /// The current selection of `family` as disjoint sorted ranges.
    pub fn selected_ranges(&self, family: FamilyId) -> Result<&IndexRangeSet, MaskError> {
        self.families
            .get(&family)
            .map(|s| &s.selection)
            .ok_or(MaskError::UnknownFamily { family })
    }

    /// Number of currently selected particles of `family`.
    pub fn selected_count(&self, family: FamilyId) -> Result<u64, MaskError> {
        self.selected_ranges(family).map(IndexRangeSet::count)
    }

    /// Cache-invalidation fingerprint of `family`'s selection state.
    pub fn fingerprint(&self, family: FamilyId) -> Result<MaskFingerprint, MaskError> {
        self.families
            .get(&family)
            .map(|s| MaskFingerprint {
                mask: self.id,
                version: s.version,
            })
            .ok_or(MaskError::UnknownFamily { family })
    }
}
