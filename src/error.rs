//! Error types for graph construction and traversal.

use thiserror::Error;

/// Errors reported by graph snapshots and the shortest-path computation.
///
/// Node identifiers are rendered with their `Debug` form so the error type
/// stays independent of the node type.
#[derive(Debug, Error)]
pub enum GraphError {
    /// An edge carries a weight below zero.
    #[error("negative edge weight {weight} on {from} -> {to}")]
    NegativeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// An edge weight is NaN or infinite.
    #[error("invalid edge weight {weight} on {from} -> {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// A snapshot edge refers to a node index that does not exist.
    #[error("edge {from} -> {to} out of range for {nodes} nodes")]
    EdgeOutOfRange { from: usize, to: usize, nodes: usize },

    /// Malformed JSON input.
    #[error("invalid graph json: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
