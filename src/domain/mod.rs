//! Domain layer for reelshelf.
//!
//! Core types shared by every other layer, independent of HTTP, storage, or
//! rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie records, formats and the create-form shape
//! - [`forms`]: Client-side form validation
//! - [`auth`]: Credentials and the identity decoded from a session token
//!
//! # Examples
//!
//! ```
//! use reelshelf::domain::{MovieFormData, MovieFormat};
//!
//! let form = MovieFormData {
//!     title: "Casablanca".to_string(),
//!     year: 1942,
//!     format: MovieFormat::Dvd,
//!     actors: "Humphrey Bogart, Ingrid Bergman".to_string(),
//! };
//! assert!(form.validate().is_ok());
//! ```

pub mod auth;
pub mod error;
pub mod forms;
pub mod movie;

pub use auth::{Credentials, Registration, User};
pub use error::{ReelshelfError, Result};
pub use forms::{FormErrors, ValidatedMovieForm};
pub use movie::{Movie, MovieFormData, MovieFormat, SearchField};
