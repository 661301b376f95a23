//! Error types for chunked multimap operations.

use thiserror::Error;

/// Main error type for chunk and multimap operations.
///
/// Missing keys or values in `add_key`, `remove_key`, `remove` and
/// `contains` are reported as plain `bool`/`Option` outcomes, not errors.
#[derive(Debug, Error)]
pub enum ChunkMapError {
    #[error("Index out of bounds: {index} (len is {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Chunk capacity exceeded: capacity is {capacity}")]
    CapacityExceeded { capacity: usize },

    #[error("Key not found")]
    KeyNotFound,

    #[error("Inconsistent chunk table at chunk {chunk}")]
    Inconsistent { chunk: usize },

    #[error("Multimap has been disposed")]
    Disposed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for chunked multimap operations.
pub type Result<T> = std::result::Result<T, ChunkMapError>;
