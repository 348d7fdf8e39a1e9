//! Presentation layer: view models, plain-text rendering and view effects.
//!
//! ```text
//! AppState → compute_viewmodel → CollectionViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types computed from the state tree
//! - [`renderer`]: Entry points turning view models into text
//! - [`components`]: Header, table, empty state and footer writers
//! - [`effects`]: Follow-up events the view dispatches on state changes

pub mod components;
pub mod effects;
pub mod renderer;
pub mod viewmodel;

pub use effects::{after_import, on_auth_changed};
pub use renderer::{render, render_movie};
pub use viewmodel::{CollectionViewModel, EmptyState, HeaderInfo, MovieRow, PaginationInfo};
