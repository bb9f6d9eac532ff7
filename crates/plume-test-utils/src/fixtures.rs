//! Mock snapshot source and metadata fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use plume_core::{
    Aabb, Cell, FamilyId, IndexRange, IndexRangeSet, SnapshotMetadata, SnapshotSource,
    SourceError, Unit,
};

/// Metadata with one family laid out as an n×n×n grid of equal cells in
/// the unit box, `per_cell` particles per cell, x-major cell order.
pub fn grid_metadata(family: FamilyId, n: u64, per_cell: u64) -> SnapshotMetadata {
    let w = 1.0 / n as f64;
    let mut cells = Vec::with_capacity((n * n * n) as usize);
    let mut start = 0;
    for ix in 0..n {
        for iy in 0..n {
            for iz in 0..n {
                let min = [ix as f64 * w, iy as f64 * w, iz as f64 * w];
                let max = [min[0] + w, min[1] + w, min[2] + w];
                cells.push(Cell {
                    bounds: Aabb::new(min, max),
                    particles: IndexRange::new(start, start + per_cell),
                });
                start += per_cell;
            }
        }
    }
    let mut meta = SnapshotMetadata {
        box_size: [1.0; 3],
        ..Default::default()
    };
    meta.cells.insert(family, cells);
    meta.particle_counts.insert(family, start);
    meta
}

/// In-memory [`SnapshotSource`] for tests.
///
/// Pre-populate attributes with [`set_attribute`](MockSource::set_attribute),
/// then hand the source to the code under test. `read_slice` invocations
/// are counted (for the at-most-once contract tests), can be made to
/// fail or truncate per attribute, and can carry an artificial delay
/// (for single-flight race tests).
pub struct MockSource {
    metadata: SnapshotMetadata,
    data: HashMap<(FamilyId, String), Vec<f64>>,
    fail_on: HashSet<(FamilyId, String)>,
    truncate_on: HashSet<(FamilyId, String)>,
    read_delay: Option<Duration>,
    read_slice_calls: AtomicUsize,
}

impl MockSource {
    pub fn new(metadata: SnapshotMetadata) -> Self {
        Self {
            metadata,
            data: HashMap::new(),
            fail_on: HashSet::new(),
            truncate_on: HashSet::new(),
            read_delay: None,
            read_slice_calls: AtomicUsize::new(0),
        }
    }

    /// Register an attribute's full per-particle array and its unit.
    ///
    /// The array length must equal the family's particle count.
    pub fn set_attribute(
        &mut self,
        family: FamilyId,
        name: impl Into<String>,
        values: Vec<f64>,
        unit: Unit,
    ) {
        let name = name.into();
        assert_eq!(
            Some(values.len() as u64),
            self.metadata.particle_count(family),
            "attribute array length must equal the family's particle count"
        );
        self.metadata
            .attribute_units
            .insert((family, name.clone()), unit);
        self.data.insert((family, name), values);
    }

    /// Make every `read_slice` of `(family, name)` fail.
    pub fn fail_on(&mut self, family: FamilyId, name: impl Into<String>) {
        self.fail_on.insert((family, name.into()));
    }

    /// Make every `read_slice` of `(family, name)` return one element
    /// short.
    pub fn truncate_on(&mut self, family: FamilyId, name: impl Into<String>) {
        self.truncate_on.insert((family, name.into()));
    }

    /// Sleep this long inside every `read_slice` call.
    pub fn set_read_delay(&mut self, delay: Duration) {
        self.read_delay = Some(delay);
    }

    /// Number of `read_slice` calls so far.
    pub fn read_slice_calls(&self) -> usize {
        self.read_slice_calls.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for MockSource {
    fn read_metadata(&self) -> Result<SnapshotMetadata, SourceError> {
        Ok(self.metadata.clone())
    }

    fn read_slice(
        &self,
        family: FamilyId,
        name: &str,
        ranges: &IndexRangeSet,
    ) -> Result<Vec<f64>, SourceError> {
        self.read_slice_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.read_delay {
            std::thread::sleep(delay);
        }
        let key = (family, name.to_string());
        if self.fail_on.contains(&key) {
            return Err(SourceError::Failed {
                reason: "injected failure".to_string(),
            });
        }
        let values = self.data.get(&key).ok_or_else(|| SourceError::Failed {
            reason: format!("attribute '{name}' has no backing data"),
        })?;
        let mut out: Vec<f64> = ranges
            .iter_indices()
            .map(|i| values[i as usize])
            .collect();
        if self.truncate_on.contains(&key) {
            out.pop();
        }
        Ok(out)
    }
}
