//! Application layer: the state store and its transitions.
//!
//! Data flows one way:
//!
//! ```text
//! View → Event → handle_event → state change + Actions
//!                    ↑                          │
//!                    │                  Store::execute
//!                    │            ┌─────────────┼──────────────┐
//!                    │       PostToWorker   StoreToken    ClearToken
//!                    │            │
//!                    └── WorkerResponse ◀── MovieWorker (tokio task)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects requested by a transition
//! - [`handler`]: Events and the transition function
//! - [`modes`]: Auth phase and list mode enums
//! - [`state`]: State slices and view model computation
//! - [`store`]: Owner of the state tree and in-flight operations

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{AuthPhase, ListMode};
pub use state::{AppState, AuthState, MoviesState};
pub use store::{Store, SESSION_NOT_SAVED_MESSAGE};
