//! Error types for the drape workspace.
//!
//! The numerical hot paths (geometry queries, simulation steps) never
//! fail; they degrade silently on bad input. `DrapeResult<T>` is only
//! returned at construction and validation boundaries.

use thiserror::Error;

/// Unified error type for the drape workspace.
#[derive(Debug, Error)]
pub enum DrapeError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Buffers passed to a bound deformer no longer match the bind-time layout.
    #[error("Topology mismatch: expected {expected} {what}, got {actual}")]
    TopologyMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, DrapeError>`.
pub type DrapeResult<T> = Result<T, DrapeError>;
