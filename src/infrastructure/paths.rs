//! Platform paths for configuration and data files.
//!
//! Locations follow the platform conventions reported by the `dirs` crate:
//!
//! | file | Linux | macOS |
//! |------|-------|-------|
//! | config | `~/.config/reelshelf/config.toml` | `~/Library/Application Support/reelshelf/config.toml` |
//! | data | `~/.local/share/reelshelf/` | `~/Library/Application Support/reelshelf/` |

use std::path::PathBuf;

const APP_DIR: &str = "reelshelf";

/// Returns the directory holding the session token and trace file.
///
/// Falls back to `./.reelshelf` when the platform has no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".reelshelf"), |dir| dir.join(APP_DIR))
}

/// Returns the path of the optional TOML configuration file.
#[must_use]
pub fn get_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use reelshelf::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/movies"), home.join("movies"));
///     assert_eq!(expand_tilde("~"), home);
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}
