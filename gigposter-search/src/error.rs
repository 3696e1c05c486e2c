//! Common error types for the poster search core

use thiserror::Error;

/// Common result type for search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the search core.
///
/// A strategy finding zero rows is not an error; strategies signal
/// "no match" with an empty result set and the orchestrator falls
/// through to the next one. Only genuine execution failures land here.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
