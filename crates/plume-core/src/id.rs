//! Strongly-typed identifiers for families and mask sessions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a particle family within a snapshot (gas, dark matter, ...).
///
/// The mapping from family IDs to names and class tags is owned by the
/// outer metadata layer; the core only ever sees opaque IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FamilyId(pub u32);

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FamilyId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`MaskInstanceId`] allocation.
static MASK_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a mask session.
///
/// Allocated from a monotonic atomic counter via [`MaskInstanceId::next`].
/// Two distinct masks always have different IDs, even when they hold
/// identical selections. Attribute caches key on this ID (together with
/// the per-family [`SelectionVersion`]) so that an array materialized
/// under one mask is never served to a different mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaskInstanceId(u64);

impl MaskInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns an ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(MASK_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MaskInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonically increasing version of one family's selection.
///
/// Bumped on every successful `constrain_spatial` / `constrain_property`
/// call, which lazily invalidates all attribute-cache entries resolved
/// under the previous selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionVersion(pub u64);

impl SelectionVersion {
    /// The version following this one.
    pub fn bumped(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SelectionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
