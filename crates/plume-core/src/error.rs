//! Error types for the Plume subsystems.
//!
//! One enum per subsystem: masking, attribute store, rasterizer, plus
//! the error type the I/O collaborator reports through. All of them are
//! plain data — no retry or recovery policy lives in the core.

use std::error::Error;
use std::fmt;

use crate::id::FamilyId;
use crate::range::IndexRangeSet;

/// Errors reported by a [`SnapshotSource`](crate::traits::SnapshotSource)
/// implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceError {
    /// The source returned fewer elements than the request covers.
    TruncatedRead {
        /// Number of elements the request covers.
        expected: u64,
        /// Number of elements actually returned.
        got: u64,
    },
    /// Any other failure while reading (I/O error, corrupt container).
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedRead { expected, got } => {
                write!(f, "truncated read: expected {expected} elements, got {got}")
            }
            Self::Failed { reason } => write!(f, "read failed: {reason}"),
        }
    }
}

impl Error for SourceError {}

/// Errors from mask construction and constraint application.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskError {
    /// An interval constraint has `lo > hi` or non-finite bounds.
    /// Rejected before any I/O.
    InvalidConstraint {
        /// Offending lower bound.
        lo: f64,
        /// Offending upper bound.
        hi: f64,
    },
    /// The requested family does not exist in the snapshot metadata.
    UnknownFamily {
        /// The unknown family.
        family: FamilyId,
    },
    /// The metadata's cell ranges violate their invariants (unsorted,
    /// overlapping, or not covering the family's particle count).
    InvalidCellLayout {
        /// Family whose cell layout is malformed.
        family: FamilyId,
        /// What the validation found.
        reason: String,
    },
    /// A property array does not match the current selection: property
    /// constraints operate on data materialized over exactly the
    /// currently selected particles, never on unread data.
    SelectionLengthMismatch {
        /// Selected particle count.
        expected: u64,
        /// Length of the array actually provided.
        got: u64,
    },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConstraint { lo, hi } => {
                write!(f, "invalid constraint interval [{lo}, {hi}]")
            }
            Self::UnknownFamily { family } => write!(f, "unknown particle family {family}"),
            Self::InvalidCellLayout { family, reason } => {
                write!(f, "invalid cell layout for family {family}: {reason}")
            }
            Self::SelectionLengthMismatch { expected, got } => write!(
                f,
                "property array length {got} does not match selected count {expected}"
            ),
        }
    }
}

impl Error for MaskError {}

/// Errors from the lazy attribute store.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// The I/O collaborator failed while resolving a selection. Carries
    /// the failed attribute and the ranges that were requested; retrying
    /// is the caller's decision.
    AttributeReadFailure {
        /// Family of the failed attribute.
        family: FamilyId,
        /// Name of the failed attribute.
        name: String,
        /// The ranges that were being read.
        ranges: IndexRangeSet,
        /// The underlying source failure.
        source: SourceError,
    },
    /// The attribute has no unit declared in the snapshot metadata.
    UnknownAttribute {
        /// Family of the unknown attribute.
        family: FamilyId,
        /// Name of the unknown attribute.
        name: String,
    },
    /// A mask-level failure surfaced through the store.
    Mask(MaskError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeReadFailure {
                family,
                name,
                ranges,
                source,
            } => write!(
                f,
                "failed to read attribute '{name}' of family {family} over {ranges}: {source}"
            ),
            Self::UnknownAttribute { family, name } => {
                write!(f, "attribute '{name}' of family {family} is not declared")
            }
            Self::Mask(e) => write!(f, "{e}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AttributeReadFailure { source, .. } => Some(source),
            Self::Mask(e) => Some(e),
            Self::UnknownAttribute { .. } => None,
        }
    }
}

impl From<MaskError> for StoreError {
    fn from(e: MaskError) -> Self {
        Self::Mask(e)
    }
}

/// Errors from the rasterizer.
#[derive(Clone, Debug, PartialEq)]
pub enum RasterError {
    /// A particle reached the rasterizer with a non-finite or
    /// non-positive smoothing length. Strict by default: the whole
    /// invocation fails rather than skipping the particle silently.
    InvalidSmoothingLength {
        /// Index of the offending particle in the input ordering.
        index: usize,
        /// The offending smoothing length.
        value: f64,
    },
    /// The request is outside the core's supported geometry: zero
    /// resolution, zero workers, out-of-range slice fraction, or
    /// mismatched input array lengths.
    UnsupportedGeometry {
        /// What was unsupported.
        reason: String,
    },
    /// A rasterization worker thread panicked.
    WorkerPanicked,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSmoothingLength { index, value } => {
                write!(f, "invalid smoothing length {value} for particle {index}")
            }
            Self::UnsupportedGeometry { reason } => write!(f, "unsupported geometry: {reason}"),
            Self::WorkerPanicked => write!(f, "rasterization worker panicked"),
        }
    }
}

impl Error for RasterError {}
