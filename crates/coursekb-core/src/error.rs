//! Error types for coursekb

use thiserror::Error;

/// Main error type for coursekb operations
#[derive(Debug, Error)]
pub enum CourseKbError {
    /// Error in recommender configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filter input could not be read as a JSON object
    #[error("Invalid filter input: {0}")]
    FilterInput(String),

    /// Catalog could not be loaded or queried
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for coursekb operations
pub type Result<T> = std::result::Result<T, CourseKbError>;
