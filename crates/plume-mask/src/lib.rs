//! Spatial cell index and selection masks for Plume snapshots.
//!
//! This crate implements the masking engine: [`CellIndex`] answers
//! spatial queries against the snapshot's top-level cell layout without
//! touching per-particle arrays, and [`Mask`] composes spatial and
//! property constraints into one progressively narrowing
//! [`IndexRangeSet`](plume_core::IndexRangeSet) per particle family.
//!
//! The contract throughout is ahead-of-time filtering: every constraint
//! narrows the selection before any array read happens, and property
//! constraints only ever see data materialized over the current
//! selection.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell_index;
pub mod mask;

pub use cell_index::CellIndex;
pub use mask::{Mask, MaskFingerprint};
