//! Plume: spatial masking and SPH rasterization for particle snapshots.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Plume sub-crates. For most users, adding `plume` as a
//! single dependency is sufficient.
//!
//! A query session runs in three steps: build a [`prelude::Mask`] from
//! snapshot metadata and narrow it spatially and by property value,
//! materialize the attributes the selection needs through a
//! [`prelude::AttributeStore`], then rasterize them with
//! [`prelude::project`] or [`prelude::slice`]. The I/O collaborator
//! behind the [`prelude::SnapshotSource`] trait is only ever asked for
//! the index ranges the mask actually selects.
//!
//! # Quick start
//!
//! ```rust
//! use plume::prelude::*;
//! use plume::types::{Aabb, Cell, IndexRange, SnapshotMetadata, SourceError, Unit};
//! use std::sync::Arc;
//!
//! // An in-memory snapshot: one family, eight particles, one cell
//! // covering the whole unit box, unit masses.
//! struct Demo;
//!
//! impl SnapshotSource for Demo {
//!     fn read_metadata(&self) -> Result<SnapshotMetadata, SourceError> {
//!         let gas = FamilyId(0);
//!         let mut meta = SnapshotMetadata {
//!             box_size: [1.0; 3],
//!             ..Default::default()
//!         };
//!         meta.cells.insert(
//!             gas,
//!             vec![Cell {
//!                 bounds: Aabb::new([0.0; 3], [1.0; 3]),
//!                 particles: IndexRange::new(0, 8),
//!             }],
//!         );
//!         meta.particle_counts.insert(gas, 8);
//!         meta.attribute_units
//!             .insert((gas, "masses".to_string()), Unit::new("g"));
//!         Ok(meta)
//!     }
//!
//!     fn read_slice(
//!         &self,
//!         _family: FamilyId,
//!         _name: &str,
//!         ranges: &IndexRangeSet,
//!     ) -> Result<Vec<f64>, SourceError> {
//!         Ok(ranges.iter_indices().map(|_| 1.0).collect())
//!     }
//! }
//!
//! let source = Demo;
//! let metadata = Arc::new(source.read_metadata()?);
//! let gas = FamilyId(0);
//!
//! // Select everything, materialize the masses, project them along z.
//! let mask = Mask::new(&metadata)?;
//! let mut store = AttributeStore::new(source, Arc::clone(&metadata));
//! let masses = store.get(&mask, gas, "masses")?;
//! assert_eq!(masses.len(), 8);
//!
//! let positions: Vec<[f64; 3]> = (0..8)
//!     .map(|i| [(i as f64 + 0.5) / 8.0; 3])
//!     .collect();
//! let smoothing = vec![0.1; 8];
//! let field = ParticleField::new(&positions, &smoothing, masses.values())?;
//! let table = KernelTable::new(&CubicSpline);
//! let image = project(&field, &table, 16, Axis::Z)?;
//! assert!(image.total() > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plume-core` | IDs, index ranges, metadata, errors, the source trait |
//! | [`mask`] | `plume-mask` | Cell index and the spatial/property mask |
//! | [`store`] | `plume-store` | Lazy attribute materialization and caching |
//! | [`raster`] | `plume-raster` | Kernels, pixel grids, projection and slicing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`plume-core`).
///
/// Contains [`types::IndexRangeSet`], [`types::SnapshotMetadata`], the
/// [`types::SnapshotSource`] collaborator trait, and the error enums.
pub use plume_core as types;

/// Cell index and mask (`plume-mask`).
///
/// [`mask::CellIndex`] answers spatial queries from cell metadata;
/// [`mask::Mask`] composes spatial and property constraints into one
/// fingerprinted selection per family.
pub use plume_mask as mask;

/// Lazy attribute materialization (`plume-store`).
///
/// [`store::AttributeStore`] for single-threaded sessions,
/// [`store::SharedAttributeStore`] when concurrent consumers share a
/// finalized mask.
pub use plume_store as store;

/// SPH rasterization (`plume-raster`).
///
/// Kernels, the column-kernel lookup table, and the projection and
/// slice drivers, serial and parallel.
pub use plume_raster as raster;

/// Common imports for typical Plume usage.
///
/// ```rust
/// use plume::prelude::*;
/// ```
pub mod prelude {
    // Core types and the collaborator trait
    pub use plume_core::{
        AxisConstraints, FamilyId, IndexRangeSet, Interval, SnapshotSource, Unit,
    };

    // Errors
    pub use plume_core::{MaskError, RasterError, SourceError, StoreError};

    // Mask
    pub use plume_mask::{CellIndex, Mask, MaskFingerprint};

    // Store
    pub use plume_store::{AttributeStore, MaterializedAttribute, SharedAttributeStore};

    // Rasterizer
    pub use plume_raster::{
        project, project_parallel, slice, slice_parallel, Axis, CubicSpline, Kernel, KernelTable,
        ParticleField, PixelGrid, TopHat,
    };
}
