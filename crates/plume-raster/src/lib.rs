//! SPH rasterization onto periodic pixel grids.
//!
//! Two operations over a [`ParticleField`]: [`project`] integrates the
//! smoothing kernel along a box axis and deposits column densities,
//! [`slice`] samples the full 3-D kernel on a plane through the box.
//! Both treat the unit box as periodic in every axis and accumulate
//! into a dense f64 [`PixelGrid`].
//!
//! Kernels are capabilities: anything implementing [`Kernel`] drives a
//! call. Projection reads the column kernel through a precomputed
//! [`KernelTable`] rather than evaluating the integral per pixel.
//!
//! [`project_parallel`] and [`slice_parallel`] split the particle
//! sequence into contiguous partitions over worker threads with
//! private grids, merged in ascending partition order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod grid;
pub mod kernel;
pub mod parallel;
pub mod project;
pub mod slice;
pub mod table;

pub use field::{Axis, ParticleField};
pub use grid::PixelGrid;
pub use kernel::{CubicSpline, Kernel, TopHat};
pub use parallel::{project_parallel, slice_parallel};
pub use project::project;
pub use slice::slice;
pub use table::KernelTable;
