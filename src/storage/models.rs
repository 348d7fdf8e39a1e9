//! Storage record models for the persistence layer.

use serde::{Deserialize, Serialize};

/// A persisted session token.
///
/// `saved_at` is informational only; tokens are never expired client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Raw token exactly as the server issued it.
    pub token: String,

    /// Unix timestamp of when the token was stored.
    pub saved_at: i64,
}

impl SessionRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelshelf::storage::SessionRecord;
    ///
    /// let record = SessionRecord::new("abc");
    /// assert_eq!(record.token, "abc");
    /// assert!(record.saved_at > 0);
    /// ```
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}
