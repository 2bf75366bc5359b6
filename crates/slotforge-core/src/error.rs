//! Error types for SlotForge

use thiserror::Error;

use crate::bound::BoundMode;

/// Main error type for SlotForge operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotForgeError {
    /// A preference rank outside 1..=4
    #[error("Invalid preference rank {0}: expected 1, 2, 3 or 4")]
    InvalidPreference(i64),

    /// A cost value the cost model never produces
    #[error("Unknown cost {0}: not produced by the cost model")]
    UnknownCost(u64),

    /// A matrix cell above `Cost::FORBIDDEN`
    #[error("Cost {0} out of range: matrix cells may not exceed the forbidden cost 2^40")]
    CostOutOfRange(u64),

    /// Weight table rejected by the cost model
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Cost matrix shape disagrees with the declared entities and persons
    #[error(
        "Dimension mismatch: expected {expected_rows}x{expected_cols} cost matrix, got {rows}x{cols}"
    )]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Unrecognized bound mode
    #[error("Invalid bound mode '{0}': expected exact, at_least or at_most")]
    InvalidBoundMode(String),

    /// Two entities or two persons share a name
    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// No assignment satisfies the capacity constraints
    #[error(
        "No feasible {mode} assignment: under-served persons [{}], under-subscribed entities [{}]",
        .persons.join(", "),
        .entities.join(", ")
    )]
    Infeasible {
        mode: BoundMode,
        persons: Vec<String>,
        entities: Vec<String>,
    },

    /// Solver was cancelled before completion
    #[error("Solver was cancelled")]
    Cancelled,

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for SlotForge operations
pub type Result<T> = std::result::Result<T, SlotForgeError>;
