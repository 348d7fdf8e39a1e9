//! Movie domain model.
//!
//! A [`Movie`] is the in-memory record every layer works with. Wire shapes
//! (actor objects, numeric ids) are converted into it by
//! [`crate::api::wire`] before anything reaches the state store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical media format of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovieFormat {
    #[serde(rename = "VHS")]
    Vhs,
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "Blu-ray")]
    BluRay,
}

impl MovieFormat {
    /// Every supported format, in the order they are offered to users.
    pub const ALL: [Self; 3] = [Self::Vhs, Self::Dvd, Self::BluRay];

    /// Returns the label used on the wire and in import files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vhs => "VHS",
            Self::Dvd => "DVD",
            Self::BluRay => "Blu-ray",
        }
    }
}

impl fmt::Display for MovieFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieFormat {
    type Err = String;

    /// Parses a format label, ignoring case and the hyphen in `Blu-ray`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "vhs" => Ok(Self::Vhs),
            "dvd" => Ok(Self::Dvd),
            "bluray" => Ok(Self::BluRay),
            other => Err(format!("unknown movie format '{other}' (expected VHS, DVD or Blu-ray)")),
        }
    }
}

/// A movie record as held by the state store.
///
/// `actors` is always a list of plain names, whatever shape the server used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub format: MovieFormat,
    pub actors: Vec<String>,
}

/// Transient input used to build a create request.
///
/// `actors` is the raw comma-separated text typed by the user; it is split
/// into names only when the request is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFormData {
    pub title: String,
    pub year: i32,
    pub format: MovieFormat,
    pub actors: String,
}

impl MovieFormData {
    /// Splits the actors text on commas, trimming names and dropping blanks.
    ///
    /// ```
    /// use reelshelf::domain::{MovieFormData, MovieFormat};
    ///
    /// let form = MovieFormData {
    ///     title: "The Green Mile".into(),
    ///     year: 1999,
    ///     format: MovieFormat::Dvd,
    ///     actors: " Tom Hanks, ,David Morse ".into(),
    /// };
    /// assert_eq!(form.actor_names(), vec!["Tom Hanks", "David Morse"]);
    /// ```
    #[must_use]
    pub fn actor_names(&self) -> Vec<String> {
        self.actors
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Which movie attribute a search query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    Title,
    Actor,
}

impl SearchField {
    /// Query-string key understood by the movies endpoint.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Actor => "actor",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}
