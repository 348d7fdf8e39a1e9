//! Error types for the reelshelf client.
//!
//! This module defines the centralized error type [`ReelshelfError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Errors coming back
//! from the REST service are *not* represented here: they are normalized into a
//! message string at the API client boundary (see [`crate::api::ApiError`]) and
//! stored verbatim in the state tree.

use thiserror::Error;

/// The main error type for reelshelf operations.
///
/// Covers everything that can go wrong outside of the remote service itself:
/// token persistence, configuration, import file handling, and token decoding.
///
/// # Examples
///
/// ```
/// use reelshelf::domain::ReelshelfError;
///
/// fn validate_config() -> Result<(), ReelshelfError> {
///     Err(ReelshelfError::Config("api_url must not be empty".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum ReelshelfError {
    /// Durable token storage failed.
    ///
    /// Occurs when reading from or writing to the token store fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A background operation could not complete.
    ///
    /// Raised when an in-flight task panicked or was aborted before it could
    /// report its outcome.
    #[error("Worker error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The selected import file cannot be used.
    #[error("Import error: {0}")]
    Import(String),

    /// A credential token could not be decoded into a user identity.
    #[error("Token error: {0}")]
    Token(String),

    /// An intent was dispatched with arguments the store refuses.
    #[error("Invalid request: {0}")]
    Validation(String),
}

/// A specialized `Result` type for reelshelf operations.
pub type Result<T> = std::result::Result<T, ReelshelfError>;
