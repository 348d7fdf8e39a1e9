//! REST client layer.
//!
//! - [`client`]: [`ApiClient`], one method per service endpoint
//! - [`wire`]: Server payload shapes and their conversion into domain types
//! - [`error`]: [`ApiError`], normalized to a single message per failure

pub mod client;
pub mod error;
pub mod wire;

pub use client::{ApiClient, ApiResult};
pub use error::ApiError;
pub use wire::MoviePage;
