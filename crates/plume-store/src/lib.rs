//! Lazy, mask-keyed attribute materialization.
//!
//! [`AttributeStore`] resolves named per-particle attributes on first
//! touch: it asks the I/O collaborator for exactly the array slices the
//! current mask selects, tags the result with its declared unit, and
//! caches it under the mask's fingerprint. The collaborator is invoked
//! at most once per (family, attribute, mask-state) triple — only the
//! requested fields, only for the requested region, only once.
//!
//! [`SharedAttributeStore`] extends the same contract across threads:
//! concurrent consumers racing on the same attribute collapse to a
//! single read (single-flight).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod shared;
pub mod store;

pub use shared::SharedAttributeStore;
pub use store::{AttributeStore, MaterializedAttribute};
