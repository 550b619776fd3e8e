//! Error type shared by all ACO operations.

use thiserror::Error;

/// Result alias for ACO operations.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Errors reported before any ant budget is spent.
///
/// Invalid inputs are rejected as-is; nothing is clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending parameter.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The distance matrix has fewer than two nodes.
    #[error("distance matrix needs at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    /// A row of the distance matrix has the wrong length.
    #[error("distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Row index.
        row: usize,
        /// Actual row length.
        len: usize,
        /// Expected row length (number of rows).
        expected: usize,
    },

    /// An off-diagonal distance is zero, negative or not finite.
    #[error("distance {from} -> {to} must be finite and strictly positive, got {value}")]
    InvalidDistance {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
        /// Offending value.
        value: f64,
    },

    /// The start node is not a node of the graph.
    #[error("start node {start} out of range for {n} nodes")]
    StartNodeOutOfRange {
        /// Requested start node.
        start: usize,
        /// Number of nodes.
        n: usize,
    },

    /// Pheromone and distance matrices disagree in size.
    #[error("pheromone matrix has {pheromone} nodes but distance matrix has {distances}")]
    ShapeMismatch {
        /// Node count of the distance matrix.
        distances: usize,
        /// Node count of the pheromone matrix.
        pheromone: usize,
    },

    /// The run was cancelled before a single generation completed.
    #[error("cancelled before the first generation completed")]
    Cancelled,

    /// The time limit expired before a single generation completed.
    #[error("time limit of {limit_ms} ms expired before the first generation completed")]
    TimeLimitExceeded {
        /// Configured limit in milliseconds.
        limit_ms: u64,
    },
}

impl AcoError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        AcoError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
