//! The I/O collaborator boundary.

use crate::error::SourceError;
use crate::id::FamilyId;
use crate::metadata::SnapshotMetadata;
use crate::range::IndexRangeSet;

/// The core's only external interface: a source of snapshot metadata and
/// on-demand array slices.
///
/// Implementations own all file-format knowledge (container parsing,
/// layout, compression). The core calls `read_slice` with exactly the
/// ranges the current selection requires — never the full array — and
/// relies on the returned elements arriving in ascending global-index
/// order, concatenated across ranges.
///
/// A `read_slice` call may block on real I/O. The store guarantees it is
/// invoked at most once per (family, attribute, mask-state) triple, and
/// the shared store additionally collapses concurrent duplicate requests
/// to a single call.
pub trait SnapshotSource {
    /// Read the snapshot-level metadata: cell layouts, particle counts,
    /// box size, and attribute units.
    fn read_metadata(&self) -> Result<SnapshotMetadata, SourceError>;

    /// Read the values of `(family, name)` for exactly the given ranges,
    /// concatenated in ascending global-index order.
    ///
    /// The returned length must equal `ranges.count()`; short reads are
    /// treated as truncation by the caller and not retried.
    fn read_slice(
        &self,
        family: FamilyId,
        name: &str,
        ranges: &IndexRangeSet,
    ) -> Result<Vec<f64>, SourceError>;
}
