//! Errors in the library.
use thiserror::Error;

/// Errors returned by replay memories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// The memory is full and overwriting was not allowed.
    #[error("Capacity exceeded: the memory holds at most {capacity} items")]
    CapacityExceeded {
        /// Capacity of the memory.
        capacity: usize,
    },

    /// The memory has no items.
    #[error("Empty buffer: the memory has no items")]
    EmptyBuffer,

    /// More items were requested than the memory holds.
    #[error("Sample size exceeded: requested {requested} items, but only {available} are stored")]
    SampleSizeExceeded {
        /// Requested batch size.
        requested: usize,

        /// Number of stored items.
        available: usize,
    },

    /// A memory cannot be built with zero capacity.
    #[error("Invalid capacity: capacity must be positive")]
    InvalidCapacity,

    /// Storage for the requested capacity could not be allocated.
    #[error("Allocation failed: cannot reserve room for {capacity} items")]
    AllocationFailed {
        /// Requested capacity.
        capacity: usize,
    },

    /// The initial write cursor is out of range.
    #[error("Invalid position: {position} is not in [0, {capacity})")]
    InvalidPosition {
        /// Requested cursor position.
        position: usize,

        /// Capacity of the memory.
        capacity: usize,
    },
}

/// Errors returned by explorers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// No action values were given.
    #[error("Empty action values")]
    EmptyActionValues,

    /// Action values contain NaN or infinity.
    #[error("Invalid action values: {0}")]
    InvalidActionValues(String),
}
