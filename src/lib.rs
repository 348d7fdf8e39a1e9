//! Reelshelf: a client for a remote movie-collection service.
//!
//! Reelshelf keeps a user's movie collection in sync with a REST service:
//! - Account registration, login and a durable session token
//! - Paginated browsing, details, creation and deletion of movies
//! - Search by title or by actor
//! - Bulk import from a plain-text file
//! - A predictable state store that every view reads from

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command-line front end (main.rs)                   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ Event
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Store: state tree + in-flight operations         │
//! │  - handle_event: the only state transition          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │ Action             │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Worker Layer  │   │ Storage Layer │   │ UI Layer      │
//! │ (worker/)     │   │ (storage/)    │   │ (ui/)         │
//! │ - Operations  │   │ - Token slot  │   │ - Text render │
//! │ - Rejections  │   │ - JSON file   │   │ - View effects│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  API client (api/) and import pipeline (import/)    │
//! │  - reqwest over the movies REST service             │
//! │  - wire-format normalization                        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, infrastructure, observability              │
//! │  - Movie, forms, auth identity (domain/)            │
//! │  - Platform paths (infrastructure/)                 │
//! │  - tracing + OpenTelemetry file export              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Store, events, actions and state slices
//! - [`api`]: REST client and response normalization
//! - [`domain`]: Movies, form validation, identity, errors
//! - [`import`]: Import-file normalization
//! - [`infrastructure`]: Platform paths
//! - [`storage`]: Durable session-token slot
//! - [`worker`]: Async operations and their outcomes
//! - [`ui`]: View models, plain-text rendering, view effects
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Defaults ([`Config::default`])
//! 2. `config.toml` in the platform config directory
//! 3. `REELSHELF_API_URL`, `REELSHELF_PAGE_SIZE`, `REELSHELF_DATA_DIR`,
//!    `REELSHELF_TRACE_LEVEL`
//! 4. Command-line flags
//!
//! ```toml
//! # ~/.config/reelshelf/config.toml
//! api_url = "https://movies.example.com/api/v1"
//! page_size = 20
//! trace_level = "reelshelf=debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use reelshelf::app::Event;
//! use reelshelf::{initialize, Config};
//!
//! # async fn run() -> reelshelf::Result<()> {
//! let mut store = initialize(&Config::load()?)?;
//! if store.state().auth.is_authenticated {
//!     store.dispatch_and_settle(Event::FetchMovies { page: 1 }).await?;
//! }
//! println!("{} movies", store.state().movies.total_movies);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod import;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Store};
pub use domain::{Movie, MovieFormat, ReelshelfError, Result};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default REST service root.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default number of movies per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const ENV_PREFIX: &str = "REELSHELF_";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the movies service, without a trailing slash.
    pub api_url: String,

    /// Movies per page when browsing the collection. Must be at least 1.
    pub page_size: u32,

    /// Directory holding `session.json` and the span file.
    pub data_dir: PathBuf,

    /// Tracing filter directive, e.g. `debug` or `reelshelf=trace`.
    ///
    /// `RUST_LOG` takes precedence when set. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: infrastructure::get_data_dir(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs over the defaults.
    ///
    /// Recognized keys are `api_url`, `page_size`, `data_dir` and
    /// `trace_level`. Unknown keys are ignored.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use reelshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "https://movies.example.com/api/v1".to_string());
    /// map.insert("page_size".to_string(), "25".to_string());
    ///
    /// let config = Config::from_map(&map)?;
    /// assert_eq!(config.page_size, 25);
    /// # Ok::<(), reelshelf::ReelshelfError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ReelshelfError::Config`] if `page_size` is not a number.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let mut config = Self::default();
        config.apply_map(map)?;
        Ok(config)
    }

    /// Overrides fields with the recognized keys of `map`.
    ///
    /// # Errors
    ///
    /// Returns [`ReelshelfError::Config`] if `page_size` is not a number.
    pub fn apply_map(&mut self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(api_url) = map.get("api_url") {
            self.api_url = api_url.trim().trim_end_matches('/').to_string();
        }
        if let Some(page_size) = map.get("page_size") {
            self.page_size = page_size.trim().parse().map_err(|e| {
                ReelshelfError::Config(format!("invalid page_size {page_size:?}: {e}"))
            })?;
        }
        if let Some(data_dir) = map.get("data_dir") {
            self.data_dir = infrastructure::expand_tilde(data_dir.trim());
        }
        if let Some(trace_level) = map.get("trace_level") {
            self.trace_level = Some(trace_level.clone()).filter(|level| !level.trim().is_empty());
        }
        Ok(())
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ReelshelfError::Config`] on malformed TOML or mistyped values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(contents).map_err(|e| ReelshelfError::Config(e.to_string()))?;
        if let Some(raw) = config.data_dir.to_str() {
            config.data_dir = infrastructure::expand_tilde(raw);
        }
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Reads a TOML file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents)
                .map_err(|e| ReelshelfError::Config(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the platform config file, then applies `REELSHELF_*` variables.
    ///
    /// # Errors
    ///
    /// See [`Config::from_file`] and [`Config::apply_map`].
    pub fn load() -> Result<Self> {
        let mut config = match infrastructure::get_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_map(&env_overrides(std::env::vars()))?;
        Ok(config)
    }

    /// Checks that the configuration can be used to reach the service.
    ///
    /// # Errors
    ///
    /// Returns [`ReelshelfError::Config`] if `api_url` is not an absolute
    /// `http`/`https` URL or `page_size` is zero.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| ReelshelfError::Config(format!("invalid api_url {:?}: {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ReelshelfError::Config(format!(
                "api_url must use http or https, got {:?}",
                url.scheme()
            )));
        }
        if self.page_size == 0 {
            return Err(ReelshelfError::Config("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Location of the durable session token.
    #[must_use]
    pub fn token_file(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// Location of the exported span file.
    #[must_use]
    pub fn trace_file(&self) -> PathBuf {
        self.data_dir.join("reelshelf-otlp.json")
    }
}

/// Maps `REELSHELF_API_URL=...` style variables onto config keys.
fn env_overrides(vars: impl IntoIterator<Item = (String, String)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|name| (name.to_ascii_lowercase(), value))
        })
        .collect()
}

/// Creates the store for a validated configuration.
///
/// The session token is kept in [`Config::token_file`]; a token saved by an
/// earlier run is restored.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the token file
/// cannot be read.
pub fn initialize(config: &Config) -> Result<Store> {
    tracing::debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "initializing reelshelf");

    config.validate()?;
    let tokens = storage::JsonTokenStore::new(config.token_file())?;
    Store::new(config, Box::new(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000/api/v1");
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_keeps_defaults_for_missing_keys() {
        let config = Config::from_toml_str("page_size = 25\napi_url = \"https://m.example.com/api/\"\n").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.api_url, "https://m.example.com/api");
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn toml_type_errors_are_config_errors() {
        assert!(matches!(
            Config::from_toml_str("page_size = \"many\""),
            Err(ReelshelfError::Config(_))
        ));
    }

    #[test]
    fn env_variables_map_to_keys() {
        let vars = vec![
            ("REELSHELF_PAGE_SIZE".to_string(), "5".to_string()),
            ("REELSHELF_TRACE_LEVEL".to_string(), "debug".to_string()),
            ("HOME".to_string(), "/home/x".to_string()),
        ];
        let mut config = Config::default();
        config.apply_map(&env_overrides(vars)).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_page_size_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "ten".to_string());
        assert!(Config::from_map(&map).is_err());

        let config = Config { page_size: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_urls_are_rejected() {
        let config = Config { api_url: "ftp://movies.example.com".into(), ..Config::default() };
        assert!(matches!(config.validate(), Err(ReelshelfError::Config(_))));
        let config = Config { api_url: "not a url".into(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn initialize_creates_token_store_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { data_dir: dir.path().join("data"), ..Config::default() };
        let store = initialize(&config).unwrap();
        assert!(!store.state().auth.is_authenticated);
        assert!(dir.path().join("data").is_dir());
    }
}
