//! Storage layer for the durable session token.
//!
//! # Modules
//!
//! - `backend`: [`TokenStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based implementation with atomic writes
//! - `memory`: Process-local implementation
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::TokenStore;
pub use json::JsonTokenStore;
pub use memory::MemoryTokenStore;
pub use models::SessionRecord;
