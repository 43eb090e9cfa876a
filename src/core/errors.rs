//! Shared error types for the application

use thiserror::Error;

/// Main error type for fraclus operations
#[derive(Debug, Error)]
pub enum FraclusError {
    /// Supporter count below the documented bound
    #[error("Invalid parameter: number of supporters must be at least 2, got {0}")]
    InvalidParameter(usize),

    /// Clustering requested over an empty database
    #[error("Invalid input: empty database")]
    EmptyDatabase,

    /// Every candidate pair in a round produced a non-finite cost
    #[error("Degenerate metric: no finite pair cost in round {round}")]
    DegenerateMetric { round: usize },

    /// Point file parsing errors
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A vector whose dimensionality differs from the first one
    #[error("Dimension mismatch at line {line}: expected {expected} components, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for fraclus operations
pub type Result<T> = std::result::Result<T, FraclusError>;
