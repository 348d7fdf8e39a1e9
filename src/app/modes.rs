//! State machine enums for authentication and list display.
//!
//! # Auth phases
//!
//! ```text
//! Anonymous ──login/register──▶ Pending ──ok──▶ Authenticated
//!     ▲                            │                  │
//!     │                            └─fail─▶ Error     │
//!     └──────────────── logout (from any phase) ──────┘
//! ```
//!
//! # List modes
//!
//! The view shows either the paginated collection or the latest search
//! results; the two lists are kept independently in the state tree.

use serde::{Deserialize, Serialize};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthPhase {
    /// No session and no outstanding error.
    Anonymous,

    /// A login or registration request is in flight.
    Pending,

    /// A decoded session token is held.
    Authenticated,

    /// The last login or registration was rejected.
    Error,
}

/// Which list the collection view displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListMode {
    /// The paginated collection, counted by the server total.
    #[default]
    Collection,

    /// The latest search results, counted by their length.
    SearchResults,
}
