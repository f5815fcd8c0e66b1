//! Common error types for the Shopfront catalog service

use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error taxonomy across the catalog service
///
/// Propagation policy:
/// - `Validation` / `NotFound`: surfaced to the caller immediately, state untouched
/// - `Classifier`: absorbed locally by the reconciliation fallback, never surfaced
/// - `Persistence`: retried with backoff, surfaced only after retries exhaust
/// - `CorruptState`: recovered via the backup copy, then via the default snapshot
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input to a mutation operation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation targets a nonexistent item or category
    #[error("Not found: {0}")]
    NotFound(String),

    /// External classifier failed or is unavailable
    #[error("Classifier unavailable: {0}")]
    Classifier(String),

    /// Durable storage read/write failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Persisted snapshot failed to parse
    #[error("Corrupt catalog state: {0}")]
    CorruptState(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
