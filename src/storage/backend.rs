//! Durable token storage abstraction.
//!
//! This module defines the [`TokenStore`] trait: a single named slot holding
//! the raw session token. It is read once when the store starts and written
//! or cleared only by login, registration, and logout.

use crate::domain::error::Result;

/// Abstraction over the durable slot holding the session token.
///
/// # Implementations
///
/// - [`crate::storage::JsonTokenStore`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryTokenStore`]: process-local, for tests and
///   throwaway sessions
///
/// # Examples
///
/// ```no_run
/// use reelshelf::storage::{JsonTokenStore, TokenStore};
/// use std::path::PathBuf;
///
/// let mut tokens = JsonTokenStore::new(PathBuf::from("/tmp/session.json"))?;
/// tokens.save("eyJhbGciOi...")?;
/// assert_eq!(tokens.load()?.as_deref(), Some("eyJhbGciOi..."));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TokenStore: Send {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the previous token is kept.
    fn save(&mut self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be updated.
    fn clear(&mut self) -> Result<()>;
}
