//! JSON file-based token storage.
//!
//! The token lives in a small, human-readable JSON file written atomically
//! (write-to-temp + rename) so a crash never leaves a half-written session.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "token": "eyJhbGciOiJIUzI1NiIs...",
//!   "saved_at": 1718000000
//! }
//! ```

use crate::domain::error::{ReelshelfError, Result};
use crate::storage::backend::TokenStore;
use crate::storage::models::SessionRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(flatten)]
    session: SessionRecord,
}

/// JSON file token store.
///
/// The file exists only while a token is stored; [`TokenStore::clear`]
/// removes it.
pub struct JsonTokenStore {
    file_path: PathBuf,
    session: Option<SessionRecord>,
}

impl JsonTokenStore {
    /// Opens the token file at `file_path`, creating parent directories.
    ///
    /// A file that cannot be parsed or carries an unknown version is removed
    /// and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File permissions prevent reading or removing the file
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing token storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let session = if file_path.exists() {
            match Self::load_from_file(&file_path) {
                Ok(session) => Some(session),
                Err(ReelshelfError::Storage(reason)) => {
                    tracing::warn!(path = ?file_path, %reason, "discarding unreadable session file");
                    std::fs::remove_file(&file_path)?;
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        tracing::debug!(has_token = session.is_some(), "token storage initialized");
        Ok(Self { file_path, session })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<SessionRecord> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ReelshelfError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != FORMAT_VERSION {
            return Err(ReelshelfError::Storage(format!(
                "unsupported session file version {}",
                data.version
            )));
        }

        tracing::debug!(saved_at = data.session.saved_at, "loaded stored session");
        Ok(data.session)
    }

    fn save_to_file(&self, session: &SessionRecord) -> Result<()> {
        let data = StorageData {
            version: FORMAT_VERSION,
            session: session.clone(),
        };
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| ReelshelfError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "session saved");
        Ok(())
    }
}

impl TokenStore for JsonTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.session.as_ref().map(|session| session.token.clone()))
    }

    fn save(&mut self, token: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_save_token").entered();

        let session = SessionRecord::new(token);
        self.save_to_file(&session)?;
        self.session = Some(session);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_token").entered();

        match std::fs::remove_file(&self.file_path) {
            Ok(()) => tracing::debug!("session file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!("no session file to remove");
            }
            Err(e) => return Err(e.into()),
        }
        self.session = None;
        Ok(())
    }
}
