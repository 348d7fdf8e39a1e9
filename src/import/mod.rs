//! Bulk import of plain-text movie lists.
//!
//! An import file holds records separated by exactly one blank line:
//!
//! ```text
//! Title: The Shawshank Redemption
//! Year: 1994
//! Format: DVD
//! Actors: Tim Robbins, Morgan Freeman, Bob Gunton
//!
//! Title: The Godfather
//! Year: 1972
//! Format: Blu-ray
//! Actors: Marlon Brando, Al Pacino, James Caan
//! ```
//!
//! Editors routinely add byte-order marks, carriage returns and extra blank
//! lines, which the server rejects. [`ImportFile`] normalizes the text on
//! construction; fields themselves are parsed by the server.

use crate::domain::error::{ReelshelfError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const BYTE_ORDER_MARK: char = '\u{feff}';

static BLANK_LINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("blank line pattern is a valid regex"));

/// Normalizes raw import text.
///
/// Strips a leading byte-order mark, converts `\r\n` and lone `\r` to `\n`,
/// then collapses every run of two or more newlines to exactly one blank
/// line. Applying it twice gives the same result as applying it once.
///
/// # Example
///
/// ```
/// use reelshelf::import::normalize_import_text;
///
/// let raw = "\u{feff}Title: A\r\nYear: 1990\r\n\r\n\r\n\r\nTitle: B";
/// assert_eq!(normalize_import_text(raw), "Title: A\nYear: 1990\n\nTitle: B");
/// ```
#[must_use]
pub fn normalize_import_text(raw: &str) -> String {
    let text = raw
        .trim_start_matches(BYTE_ORDER_MARK)
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    BLANK_LINE_RUNS.replace_all(&text, "\n\n").into_owned()
}

/// A normalized import file ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    name: String,
    contents: String,
}

impl ImportFile {
    /// Wraps already-loaded text, normalizing it.
    pub fn new(name: impl Into<String>, raw: &str) -> Self {
        let contents = normalize_import_text(raw);
        let file = Self { name: name.into(), contents };
        tracing::debug!(
            file_name = %file.name,
            bytes = file.contents.len(),
            records = file.record_count(),
            "import file normalized"
        );
        file
    }

    /// Reads and normalizes a `.txt` file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReelshelfError::Import`] when the path does not end in
    /// `.txt` or is not valid UTF-8 text, and [`ReelshelfError::Io`] when it
    /// cannot be read.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_txt = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if !is_txt {
            return Err(ReelshelfError::Import(format!(
                "only .txt files can be imported: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ReelshelfError::Import(format!("not a file: {}", path.display())))?;

        let bytes = tokio::fs::read(path).await?;
        let raw = String::from_utf8(bytes)
            .map_err(|e| ReelshelfError::Import(format!("{name} is not UTF-8 text: {e}")))?;

        Ok(Self::new(name, &raw))
    }

    /// File name sent with the upload.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized text.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Number of non-blank records in the file.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.contents
            .split("\n\n")
            .filter(|record| !record.trim().is_empty())
            .count()
    }
}

/// Help text describing the accepted import format.
pub const IMPORT_FORMAT_HELP: &str = "\
Import a .txt file where each movie is a block of four lines and blocks are
separated by one blank line:

  Title: The Shawshank Redemption
  Year: 1994
  Format: DVD
  Actors: Tim Robbins, Morgan Freeman, Bob Gunton

  Title: The Godfather
  Year: 1972
  Format: Blu-ray
  Actors: Marlon Brando, Al Pacino, James Caan

Field names must match exactly. Format must be one of VHS, DVD or Blu-ray.
Extra blank lines, Windows line endings and byte-order marks are cleaned up
before upload.";
