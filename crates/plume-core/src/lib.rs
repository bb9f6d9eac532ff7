//! Core types and traits for the Plume snapshot reduction toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the masking, attribute-store,
//! and rasterization crates: typed identifiers, physical-unit labels,
//! index range sets (the canonical particle-selection representation),
//! geometry primitives, snapshot metadata, the I/O collaborator trait,
//! and the subsystem error enums.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod metadata;
pub mod range;
pub mod traits;
pub mod unit;

pub use error::{MaskError, RasterError, SourceError, StoreError};
pub use geometry::{Aabb, AxisConstraints, Interval};
pub use id::{FamilyId, MaskInstanceId, SelectionVersion};
pub use metadata::{Cell, SnapshotMetadata};
pub use range::{IndexRange, IndexRangeSet};
pub use traits::SnapshotSource;
pub use unit::Unit;
