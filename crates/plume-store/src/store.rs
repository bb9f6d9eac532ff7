//! The single-threaded lazy attribute store.

use std::sync::Arc;

use indexmap::IndexMap;

use plume_core::{
    FamilyId, SnapshotMetadata, SnapshotSource, SourceError, StoreError, Unit,
};
use plume_mask::{Mask, MaskFingerprint};

/// An attribute materialized over a mask's selection.
///
/// Values are in ascending global-index order, one per selected
/// particle, behind an `Arc` so cache hits are cheap clones.
#[derive(Clone, Debug)]
pub struct MaterializedAttribute {
    values: Arc<[f64]>,
    unit: Unit,
}

impl MaterializedAttribute {
    /// The materialized values, ordered by ascending global index.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The unit declared for this attribute by the snapshot metadata.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Number of materialized values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the selection this was materialized over is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Cache key: one entry per (family, attribute name).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct AttributeKey {
    pub(crate) family: FamilyId,
    pub(crate) name: String,
}

/// A cached attribute stamped with the mask state it was resolved under.
#[derive(Clone, Debug)]
pub(crate) struct CachedAttribute {
    pub(crate) attribute: MaterializedAttribute,
    pub(crate) fingerprint: MaskFingerprint,
}

/// Lazy attribute store for a single query session.
///
/// Each cache entry is stamped with the [`MaskFingerprint`] it was
/// resolved under. Any `constrain_*` call on the mask bumps its
/// fingerprint, so stale entries miss on the next access and are
/// re-resolved under the new selection — the central caching invariant.
/// Entries resolved under one mask are likewise never served to a
/// different mask, even at identical selection contents.
#[derive(Debug)]
pub struct AttributeStore<S> {
    source: S,
    metadata: Arc<SnapshotMetadata>,
    cache: IndexMap<AttributeKey, CachedAttribute>,
}

impl<S: SnapshotSource> AttributeStore<S> {
    /// Create a store reading from `source`, described by `metadata`.
    pub fn new(source: S, metadata: Arc<SnapshotMetadata>) -> Self {
        Self {
            source,
            metadata,
            cache: IndexMap::new(),
        }
    }

    /// Materialize `(family, name)` over `mask`'s current selection.
    ///
    /// On the first access under a given mask state this requests
    /// exactly the selected ranges from the collaborator; repeated
    /// accesses under an unchanged mask return the cached array without
    /// I/O. An empty selection materializes to an empty array without
    /// any collaborator call.
    pub fn get(
        &mut self,
        mask: &Mask,
        family: FamilyId,
        name: &str,
    ) -> Result<MaterializedAttribute, StoreError> {
        let fingerprint = mask.fingerprint(family)?;
        if let Some(cached) = self.cache.get(&AttributeKey {
            family,
            name: name.to_string(),
        }) {
            if cached.fingerprint == fingerprint {
                return Ok(cached.attribute.clone());
            }
        }

        let attribute = resolve(&self.source, &self.metadata, mask, family, name)?;
        self.cache.insert(
            AttributeKey {
                family,
                name: name.to_string(),
            },
            CachedAttribute {
                attribute: attribute.clone(),
                fingerprint,
            },
        );
        Ok(attribute)
    }

    /// Whether `(family, name)` currently has a cached materialization
    /// (possibly stale with respect to a mask — staleness is only
    /// decided against a concrete mask at access time).
    pub fn is_cached(&self, family: FamilyId, name: &str) -> bool {
        self.cache.contains_key(&AttributeKey {
            family,
            name: name.to_string(),
        })
    }

    /// Drop every cached materialization.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// Resolve one attribute over the mask's current selection.
///
/// Shared by [`AttributeStore`] and
/// [`SharedAttributeStore`](crate::SharedAttributeStore).
pub(crate) fn resolve<S: SnapshotSource>(
    source: &S,
    metadata: &SnapshotMetadata,
    mask: &Mask,
    family: FamilyId,
    name: &str,
) -> Result<MaterializedAttribute, StoreError> {
    let unit = metadata
        .unit_of(family, name)
        .cloned()
        .ok_or_else(|| StoreError::UnknownAttribute {
            family,
            name: name.to_string(),
        })?;
    let ranges = mask.selected_ranges(family)?;

    // Nothing selected: nothing to read.
    if ranges.is_empty() {
        return Ok(MaterializedAttribute {
            values: Arc::from(Vec::new()),
            unit,
        });
    }

    let values = source
        .read_slice(family, name, ranges)
        .map_err(|source| StoreError::AttributeReadFailure {
            family,
            name: name.to_string(),
            ranges: ranges.clone(),
            source,
        })?;
    let expected = ranges.count();
    if values.len() as u64 != expected {
        return Err(StoreError::AttributeReadFailure {
            family,
            name: name.to_string(),
            ranges: ranges.clone(),
            source: SourceError::TruncatedRead {
                expected,
                got: values.len() as u64,
            },
        });
    }
    Ok(MaterializedAttribute {
        values: values.into(),
        unit,
    })
}
