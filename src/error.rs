//! Error types for mesh generation and buffer transforms.

use thiserror::Error;

/// Errors produced by generators, buffers and buffer-set transforms.
///
/// All failures are synchronous and fatal to the call that detected them;
/// no partially filled buffer set escapes a failed operation.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A generator parameter is out of its documented range.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Parameter name as it appears in the generator signature.
        name: &'static str,
        /// What the parameter must satisfy.
        message: &'static str,
    },
    /// An append would exceed the buffer's fixed allocation.
    #[error("buffer capacity exceeded: capacity is {capacity} scalars, write would need {attempted}")]
    CapacityExceeded {
        /// Total scalar slots allocated at construction.
        capacity: usize,
        /// Scalar slots the rejected write would have required.
        attempted: usize,
    },
    /// The operation only accepts unindexed buffer sets.
    #[error("{0} does not support indexed buffer sets; deindex them first")]
    IndexedNotSupported(&'static str),
    /// The operation requires an index buffer and the set has none.
    #[error("{0} requires an index buffer")]
    MissingIndices(&'static str),
    /// A required attribute is absent from the buffer set.
    #[error("buffer set has no `{0}` attribute")]
    MissingAttribute(&'static str),
    /// The buffer set violates a structural invariant.
    #[error("invalid buffer set: {0}")]
    InvalidBufferSet(String),
}
