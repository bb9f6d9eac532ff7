//! Index ranges and range sets over the global particle ordering.
//!
//! An [`IndexRangeSet`] is the canonical representation of "which
//! particles are currently selected": an ordered sequence of disjoint,
//! non-adjacent `[start, end)` ranges. Spatial selection is naturally
//! range-structured (particles are pre-sorted by cell on disk), so this
//! avoids O(N) boolean storage for large snapshots.

use smallvec::SmallVec;
use std::fmt;

/// A half-open `[start, end)` range of global particle indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    /// First selected index (inclusive).
    pub start: u64,
    /// One past the last selected index (exclusive).
    pub end: u64,
}

impl IndexRange {
    /// Create a range. `start` must not exceed `end`.
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "range start {start} exceeds end {end}");
        Self { start, end }
    }

    /// Number of indices covered by this range.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the range covers no indices.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `index` falls inside `[start, end)`.
    pub fn contains(&self, index: u64) -> bool {
        self.start <= index && index < self.end
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// An ordered set of disjoint, non-adjacent index ranges.
///
/// Invariants (maintained by every constructor and operation):
/// - ranges are sorted ascending by `start`,
/// - no two ranges overlap or touch (`a.end < b.start` for consecutive
///   ranges),
/// - no range is empty.
///
/// Typical selections are a handful of ranges, so storage is inline up
/// to 8 ranges and spills to the heap beyond that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexRangeSet {
    ranges: SmallVec<[IndexRange; 8]>,
}

impl IndexRangeSet {
    /// The empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A selection covering all of `[0, count)`.
    pub fn full(count: u64) -> Self {
        let mut set = Self::empty();
        set.push(IndexRange::new(0, count));
        set
    }

    /// Build a set from arbitrary ranges, sorting and merging as needed.
    pub fn from_unsorted(ranges: impl IntoIterator<Item = IndexRange>) -> Self {
        let mut sorted: Vec<IndexRange> = ranges.into_iter().filter(|r| !r.is_empty()).collect();
        sorted.sort_by_key(|r| r.start);
        let mut set = Self::empty();
        for r in sorted {
            set.push(r);
        }
        set
    }

    /// Append a range whose start is `>=` every previously pushed start,
    /// merging it with the tail if they overlap or touch.
    ///
    /// This is the single left-to-right merge pass used by cell queries
    /// and property refinement, both of which emit ranges in ascending
    /// order by construction. Empty ranges are ignored.
    pub fn push(&mut self, range: IndexRange) {
        if range.is_empty() {
            return;
        }
        if let Some(last) = self.ranges.last_mut() {
            debug_assert!(
                range.start >= last.start,
                "push out of order: {range} after {last}"
            );
            if range.start <= last.end {
                last.end = last.end.max(range.end);
                return;
            }
        }
        self.ranges.push(range);
    }

    /// Intersection of two range sets, computed by a linear two-pointer
    /// merge. O(ranges of self + ranges of other).
    pub fn intersect(&self, other: &Self) -> Self {
        let mut out = Self::empty();
        let (a, b) = (&self.ranges, &other.ranges);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let lo = a[i].start.max(b[j].start);
            let hi = a[i].end.min(b[j].end);
            if lo < hi {
                out.push(IndexRange::new(lo, hi));
            }
            if a[i].end <= b[j].end {
                i += 1;
            } else {
                j += 1;
            }
        }
        out
    }

    /// Total number of selected indices, Σ (end − start).
    pub fn count(&self) -> u64 {
        self.ranges.iter().map(IndexRange::len).sum()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The ranges in ascending order.
    pub fn ranges(&self) -> &[IndexRange] {
        &self.ranges
    }

    /// Whether `index` is selected. O(log ranges).
    pub fn contains(&self, index: u64) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if r.end <= index {
                    std::cmp::Ordering::Less
                } else if r.start > index {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Iterate over every selected global index in ascending order.
    pub fn iter_indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.ranges.iter().flat_map(|r| r.start..r.end)
    }

    /// Whether the set satisfies its invariants (sorted, disjoint,
    /// non-adjacent, no empty ranges). Always true for sets built
    /// through this API; exposed for tests and debug assertions.
    pub fn is_normalized(&self) -> bool {
        self.ranges.iter().all(|r| !r.is_empty())
            && self.ranges.windows(2).all(|w| w[0].end < w[1].start)
    }
}

impl fmt::Display for IndexRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<IndexRange> for IndexRangeSet {
    fn from_iter<T: IntoIterator<Item = IndexRange>>(iter: T) -> Self {
        Self::from_unsorted(iter)
    }
}
