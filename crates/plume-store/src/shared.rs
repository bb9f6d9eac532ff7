//! Thread-safe attribute store with single-flight reads.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use indexmap::IndexMap;

use plume_core::{FamilyId, SnapshotMetadata, SnapshotSource, StoreError};
use plume_mask::{Mask, MaskFingerprint};

use crate::store::{resolve, AttributeKey, CachedAttribute, MaterializedAttribute};

/// One in-flight resolution, shared between the resolving thread and
/// its waiters. The slot is filled exactly once, then every waiter is
/// woken and clones the outcome.
type Flight = Arc<(Mutex<Option<Result<MaterializedAttribute, StoreError>>>, Condvar)>;

#[derive(Debug, Default)]
struct SharedState {
    cache: IndexMap<AttributeKey, CachedAttribute>,
    in_flight: HashMap<(AttributeKey, MaskFingerprint), Flight>,
}

/// A lazy attribute store shared between threads.
///
/// Same contract as [`AttributeStore`](crate::AttributeStore), plus
/// single-flight: when several threads race on the same
/// (family, attribute, mask-state) key, exactly one performs the
/// (possibly blocking) collaborator read while the rest wait for its
/// outcome. Success and failure alike propagate to every waiter of
/// that attempt, preserving the at-most-once read contract under
/// concurrent callers.
///
/// Callers share a *finalized* mask read-only (masks are not safe for
/// concurrent mutation); constraining a mask between calls works the
/// same as in the single-threaded store and invalidates via the
/// fingerprint.
#[derive(Debug)]
pub struct SharedAttributeStore<S> {
    source: S,
    metadata: Arc<SnapshotMetadata>,
    state: Mutex<SharedState>,
}

impl<S: SnapshotSource> SharedAttributeStore<S> {
    /// Create a shared store reading from `source`.
    pub fn new(source: S, metadata: Arc<SnapshotMetadata>) -> Self {
        Self {
            source,
            metadata,
            state: Mutex::new(SharedState::default()),
        }
    }

    /// Materialize `(family, name)` over `mask`'s current selection.
    ///
    /// See [`AttributeStore::get`](crate::AttributeStore::get) for the
    /// caching semantics; this adds only the concurrent-duplicate
    /// collapse.
    pub fn get(
        &self,
        mask: &Mask,
        family: FamilyId,
        name: &str,
    ) -> Result<MaterializedAttribute, StoreError> {
        let fingerprint = mask.fingerprint(family)?;
        let key = AttributeKey {
            family,
            name: name.to_string(),
        };
        let flight_key = (key.clone(), fingerprint);

        let flight: Flight = {
            let mut state = self.state.lock().expect("store state poisoned");
            if let Some(cached) = state.cache.get(&key) {
                if cached.fingerprint == fingerprint {
                    return Ok(cached.attribute.clone());
                }
            }
            if let Some(flight) = state.in_flight.get(&flight_key) {
                // Someone else is resolving this exact key: wait on the
                // attempt and share its outcome.
                let flight = Arc::clone(flight);
                drop(state);
                let (slot, ready) = &*flight;
                let mut outcome = slot.lock().expect("flight slot poisoned");
                while outcome.is_none() {
                    outcome = ready.wait(outcome).expect("flight slot poisoned");
                }
                return outcome.as_ref().expect("checked above").clone();
            }
            let flight: Flight = Arc::new((Mutex::new(None), Condvar::new()));
            state.in_flight.insert(flight_key.clone(), Arc::clone(&flight));
            flight
        };

        // This thread is the resolver. The state lock is released while
        // the collaborator (possibly) blocks on I/O.
        let result = resolve(&self.source, &self.metadata, mask, family, name);

        {
            let mut state = self.state.lock().expect("store state poisoned");
            state.in_flight.remove(&flight_key);
            if let Ok(attribute) = &result {
                state.cache.insert(
                    key,
                    CachedAttribute {
                        attribute: attribute.clone(),
                        fingerprint,
                    },
                );
            }
        }

        let (slot, ready) = &*flight;
        *slot.lock().expect("flight slot poisoned") = Some(result.clone());
        ready.notify_all();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::Unit;
    use plume_test_utils::{grid_metadata, MockSource};
    use std::thread;
    use std::time::Duration;

    const GAS: FamilyId = FamilyId(0);

    fn fixture(delay: Option<Duration>) -> (Arc<SharedAttributeStore<MockSource>>, Arc<Mask>) {
        let meta = grid_metadata(GAS, 2, 4);
        let mut source = MockSource::new(meta);
        source.set_attribute(
            GAS,
            "ids",
            (0..32).map(|i| i as f64).collect(),
            Unit::dimensionless(),
        );
        if let Some(d) = delay {
            source.set_read_delay(d);
        }
        let meta = Arc::new(source.read_metadata().unwrap());
        let mask = Arc::new(Mask::new(&meta).unwrap());
        (Arc::new(SharedAttributeStore::new(source, meta)), mask)
    }

    #[test]
    fn sequential_gets_cache_like_the_plain_store() {
        let (store, mask) = fixture(None);
        store.get(&mask, GAS, "ids").unwrap();
        store.get(&mask, GAS, "ids").unwrap();
        assert_eq!(store.source.read_slice_calls(), 1);
    }

    #[test]
    fn racing_threads_collapse_to_one_read() {
        // The read delay keeps all threads inside the race window.
        let (store, mask) = fixture(Some(Duration::from_millis(50)));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let mask = Arc::clone(&mask);
            handles.push(thread::spawn(move || {
                store.get(&mask, GAS, "ids").unwrap()
            }));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(store.source.read_slice_calls(), 1);
        for r in &results {
            assert_eq!(r.values(), results[0].values());
            assert_eq!(r.len(), 32);
        }
    }

    #[test]
    fn failure_propagates_to_every_waiter_of_the_attempt() {
        let meta = grid_metadata(GAS, 2, 4);
        let mut source = MockSource::new(meta);
        source.set_attribute(GAS, "ids", (0..32).map(|i| i as f64).collect(), Unit::dimensionless());
        source.fail_on(GAS, "ids");
        source.set_read_delay(Duration::from_millis(50));
        let meta = Arc::new(source.read_metadata().unwrap());
        let mask = Arc::new(Mask::new(&meta).unwrap());
        let store = Arc::new(SharedAttributeStore::new(source, meta));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            let mask = Arc::clone(&mask);
            handles.push(thread::spawn(move || store.get(&mask, GAS, "ids")));
        }
        let mut errors = 0;
        for h in handles {
            if h.join().unwrap().is_err() {
                errors += 1;
            }
        }
        assert_eq!(errors, 4);
        // Failures are never cached.
        assert!(store.state.lock().unwrap().cache.is_empty());
    }

    #[test]
    fn distinct_attributes_do_not_serialize_behind_each_other() {
        let meta = grid_metadata(GAS, 2, 4);
        let mut source = MockSource::new(meta);
        source.set_attribute(GAS, "ids", (0..32).map(|i| i as f64).collect(), Unit::dimensionless());
        source.set_attribute(GAS, "masses", vec![1.5; 32], Unit::new("g"));
        let meta = Arc::new(source.read_metadata().unwrap());
        let mask = Arc::new(Mask::new(&meta).unwrap());
        let store = Arc::new(SharedAttributeStore::new(source, meta));

        let a = {
            let (store, mask) = (Arc::clone(&store), Arc::clone(&mask));
            thread::spawn(move || store.get(&mask, GAS, "ids").unwrap())
        };
        let b = {
            let (store, mask) = (Arc::clone(&store), Arc::clone(&mask));
            thread::spawn(move || store.get(&mask, GAS, "masses").unwrap())
        };
        assert_eq!(a.join().unwrap().len(), 32);
        assert_eq!(b.join().unwrap().unit(), &Unit::new("g"));
        assert_eq!(store.source.read_slice_calls(), 2);
    }
}
