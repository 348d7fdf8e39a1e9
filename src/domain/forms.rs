//! Client-side validation for the add-movie form.
//!
//! Validation happens entirely before dispatch: a [`MovieFormData`] must be
//! turned into a [`ValidatedMovieForm`] before the store will accept it, so an
//! invalid form can never reach the network.

use super::movie::MovieFormData;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Latest release year accepted by the collection.
pub const MAX_RELEASE_YEAR: i32 = 2000;

/// Earliest release year accepted by the collection.
pub const MIN_RELEASE_YEAR: i32 = 1500;

static ACTORS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z\s'-]+(?:,\s*[a-zA-Z\s'-]+)*$").expect("actors pattern is a valid regex")
});

/// Field-level validation failures for the add-movie form.
///
/// Each field carries at most one message, ready to show next to the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.summary())]
pub struct FormErrors {
    pub title: Option<String>,
    pub year: Option<String>,
    pub actors: Option<String>,
}

impl FormErrors {
    /// Returns `true` when no field has an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.year.is_none() && self.actors.is_none()
    }

    /// Iterates over `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("title", self.title.as_deref()),
            ("year", self.year.as_deref()),
            ("actors", self.actors.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|m| (field, m)))
    }

    fn summary(&self) -> String {
        self.iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A movie form that passed validation.
///
/// Only [`MovieFormData::validate`] can build one.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedMovieForm(MovieFormData);

impl ValidatedMovieForm {
    #[must_use]
    pub const fn form(&self) -> &MovieFormData {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> MovieFormData {
        self.0
    }
}

impl fmt::Debug for ValidatedMovieForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidatedMovieForm").field(&self.0).finish()
    }
}

impl MovieFormData {
    /// Checks the form the way the add-movie dialog does.
    ///
    /// # Rules
    ///
    /// - title must not be blank
    /// - year must lie in `1500..=2000`
    /// - actors must be a non-empty, comma-separated list of names made of
    ///   letters, spaces, apostrophes and hyphens
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    ///
    /// # Example
    ///
    /// ```
    /// use reelshelf::domain::{MovieFormData, MovieFormat};
    ///
    /// let form = MovieFormData {
    ///     title: "Memento".into(),
    ///     year: 2001,
    ///     format: MovieFormat::Dvd,
    ///     actors: "Guy Pearce".into(),
    /// };
    /// let errors = form.validate().unwrap_err();
    /// assert!(errors.year.unwrap().contains("later than 2000"));
    /// ```
    pub fn validate(self) -> Result<ValidatedMovieForm, FormErrors> {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.title = Some("Title is required.".to_string());
        }

        if self.year > MAX_RELEASE_YEAR {
            errors.year = Some("Release year cannot be later than 2000.".to_string());
        } else if self.year < MIN_RELEASE_YEAR {
            errors.year = Some("Please enter a valid release year.".to_string());
        }

        let actors = self.actors.trim();
        if actors.is_empty() {
            errors.actors = Some("Actors list cannot be empty.".to_string());
        } else if !ACTORS_PATTERN.is_match(actors) {
            errors.actors =
                Some("Please use a valid format (e.g., Tom Hanks, David Morse).".to_string());
        }

        if errors.is_empty() {
            Ok(ValidatedMovieForm(self))
        } else {
            tracing::debug!(errors = %errors, "movie form rejected");
            Err(errors)
        }
    }
}
