//! In-memory token storage.

use crate::domain::error::{ReelshelfError, Result};
use crate::storage::backend::TokenStore;
use std::sync::{Arc, Mutex};

/// Token store that lives only as long as the process.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the state store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// Current contents of the slot.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> Result<T> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ReelshelfError::Storage("token slot lock poisoned".to_string()))?;
        Ok(f(&mut slot))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        self.with_slot(|slot| slot.clone())
    }

    fn save(&mut self, token: &str) -> Result<()> {
        self.with_slot(|slot| *slot = Some(token.to_string()))
    }

    fn clear(&mut self) -> Result<()> {
        self.with_slot(|slot| *slot = None)
    }
}
