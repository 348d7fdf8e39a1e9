//! Wire shapes of the movies service and their conversion into domain types.
//!
//! The server nests actors as `{id, name}` records, may send numeric ids, and
//! wraps payloads in a `{data, meta}` envelope. Everything here is pure and
//! tolerant: malformed envelopes decode to empty results rather than errors.

use crate::domain::{Movie, MovieFormat};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie record exactly as the server sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMovie {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub title: String,
    pub year: i32,
    pub format: MovieFormat,
    #[serde(default)]
    pub actors: Value,
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!("unsupported movie id: {other}"))),
    }
}

impl From<WireMovie> for Movie {
    fn from(wire: WireMovie) -> Self {
        let actors = match wire.actors {
            Value::Array(records) => records
                .iter()
                .filter_map(|record| record.get("name").and_then(Value::as_str))
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: wire.id,
            title: wire.title,
            year: wire.year,
            format: wire.format,
            actors,
        }
    }
}

/// Converts one inbound movie record into a [`Movie`].
///
/// # Errors
///
/// Fails when the record lacks an id, title, year, or a known format.
pub fn transform_movie(record: &Value) -> Result<Movie, serde_json::Error> {
    WireMovie::deserialize(record).map(Movie::from)
}

/// Body sent to create a movie.
#[derive(Debug, Serialize)]
pub struct CreateMovieRequest<'a> {
    pub title: &'a str,
    pub year: i32,
    pub format: MovieFormat,
    pub actors: Vec<String>,
}

/// Body returned when a session or user is created.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub token: String,
}

/// One page of the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: u64,
}

fn transform_all(records: &[Value]) -> Vec<Movie> {
    records
        .iter()
        .filter_map(|record| match transform_movie(record) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed movie record");
                None
            }
        })
        .collect()
}

/// Decodes a paginated `{data: [...], meta: {total}}` envelope.
///
/// Anything else yields an empty page with a total of zero.
#[must_use]
pub fn decode_page(body: &Value) -> MoviePage {
    match (body.get("data"), body.get("meta")) {
        (Some(Value::Array(records)), Some(meta @ Value::Object(_))) => MoviePage {
            movies: transform_all(records),
            total: meta.get("total").and_then(Value::as_u64).unwrap_or(0),
        },
        _ => {
            tracing::debug!("list response missing data or meta, treating as empty");
            MoviePage::default()
        }
    }
}

/// Decodes a `{data: [...]}` envelope, yielding an empty list when absent.
#[must_use]
pub fn decode_list(body: &Value) -> Vec<Movie> {
    match body.get("data") {
        Some(Value::Array(records)) => transform_all(records),
        _ => Vec::new(),
    }
}

/// Returns the `data` payload of a single-record envelope, if present.
#[must_use]
pub fn data_record(body: &Value) -> Option<&Value> {
    body.get("data").filter(|data| !data.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn actors_become_plain_names_in_order() {
        let movie = transform_movie(&json!({
            "id": 3,
            "title": "Casablanca",
            "year": 1942,
            "format": "DVD",
            "actors": [{"id": 1, "name": "Humphrey Bogart"}, {"id": 2, "name": "Ingrid Bergman"}],
        }))
        .unwrap();

        assert_eq!(movie.id, "3");
        assert_eq!(movie.actors, vec!["Humphrey Bogart", "Ingrid Bergman"]);
    }

    #[test]
    fn absent_or_malformed_actors_become_empty() {
        for actors in [json!(null), json!("Tom Hanks"), json!({"name": "x"})] {
            let movie = transform_movie(&json!({
                "id": "a1", "title": "Big", "year": 1988, "format": "VHS", "actors": actors,
            }))
            .unwrap();
            assert!(movie.actors.is_empty());
        }

        let movie = transform_movie(&json!({
            "id": "a1", "title": "Big", "year": 1988, "format": "VHS",
        }))
        .unwrap();
        assert!(movie.actors.is_empty());
    }

    #[test]
    fn page_requires_data_and_meta() {
        let body = json!({
            "data": [{"id": 1, "title": "Heat", "year": 1995, "format": "Blu-ray", "actors": []}],
            "meta": {"total": 25},
        });
        let page = decode_page(&body);
        assert_eq!(page.total, 25);
        assert_eq!(page.movies.len(), 1);

        assert_eq!(decode_page(&json!({"data": []})), MoviePage::default());
        assert_eq!(decode_page(&json!({"meta": {"total": 4}})), MoviePage::default());
        assert_eq!(decode_page(&Value::Null), MoviePage::default());
    }

    #[test]
    fn missing_total_defaults_to_zero() {
        let page = decode_page(&json!({"data": [], "meta": {}}));
        assert_eq!(page.total, 0);
    }

    #[test]
    fn list_skips_records_it_cannot_read() {
        let body = json!({"data": [
            {"id": 1, "title": "Heat", "year": 1995, "format": "DVD"},
            {"id": 2, "title": "Broken"},
        ]});
        let movies = decode_list(&body);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Heat");
        assert!(decode_list(&json!({"data": {"id": 1}})).is_empty());
    }

    #[test]
    fn null_data_is_treated_as_absent() {
        assert!(data_record(&json!({"data": null})).is_none());
        assert!(data_record(&json!({})).is_none());
        assert!(data_record(&json!({"data": {"id": 1}})).is_some());
    }
}
