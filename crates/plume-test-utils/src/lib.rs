//! Test utilities and mock types for Plume development.
//!
//! Provides [`MockSource`] — an in-memory
//! [`SnapshotSource`](plume_core::SnapshotSource) with a call counter,
//! injectable failures, and an optional artificial read delay — plus
//! metadata fixtures for building regular cell layouts.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{grid_metadata, MockSource};
