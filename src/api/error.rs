//! Errors raised by the REST client.
//!
//! Every variant renders as the single human-readable message the state store
//! keeps, so callers only need `to_string()`.

use serde::Deserialize;
use thiserror::Error;

/// Fallback used when the server rejects a request without saying why.
pub const UNKNOWN_API_ERROR: &str = "An unknown API error occurred";

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{}", normalized_message(.message.as_deref(), .code.as_deref()))]
    Server {
        status: u16,
        message: Option<String>,
        code: Option<String>,
    },

    /// The request never produced a response (connection or TLS failure).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered successfully but the requested record was absent.
    #[error("{0}")]
    NotFound(String),

    /// The server answered successfully with an unusable payload.
    #[error("{0}")]
    Decode(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn normalized_message<'a>(message: Option<&'a str>, code: Option<&'a str>) -> &'a str {
    message
        .filter(|m| !m.is_empty())
        .or_else(|| code.filter(|c| !c.is_empty()))
        .unwrap_or(UNKNOWN_API_ERROR)
}

impl ApiError {
    /// Builds a [`ApiError::Server`] from a raw error response body.
    ///
    /// Bodies that are not of the `{"error": {"message", "code"}}` shape
    /// produce an error with neither field set.
    #[must_use]
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let body = serde_json::from_slice::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or_default();

        Self::Server {
            status,
            message: body.message,
            code: body.code,
        }
    }

    /// Reads an `{"error": {...}}` envelope out of an already decoded body.
    ///
    /// Returns `None` when the body carries no `error` object.
    #[must_use]
    pub fn from_error_value(status: u16, body: &serde_json::Value) -> Option<Self> {
        let body = ErrorEnvelope::deserialize(body).ok()?.error?;
        Some(Self::Server {
            status,
            message: body.message,
            code: body.code,
        })
    }

    /// The `error.message` the server sent, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Whether the server produced a response at all.
    #[must_use]
    pub const fn has_response(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_then_code() {
        let err = ApiError::from_error_body(
            400,
            br#"{"error":{"message":"Title taken","code":"MOVIE_EXISTS"}}"#,
        );
        assert_eq!(err.to_string(), "Title taken");

        let err = ApiError::from_error_body(400, br#"{"error":{"code":"MOVIE_EXISTS"}}"#);
        assert_eq!(err.to_string(), "MOVIE_EXISTS");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn unknown_bodies_fall_back_to_generic_message() {
        for body in [&b"<html>oops</html>"[..], b"", br#"{"status":0}"#] {
            let err = ApiError::from_error_body(500, body);
            assert_eq!(err.to_string(), UNKNOWN_API_ERROR);
            assert!(err.has_response());
        }
    }

    #[test]
    fn error_envelope_in_decoded_body() {
        let body = serde_json::json!({ "status": 0, "error": { "code": "AUTHENTICATION_FAILED" } });
        let err = ApiError::from_error_value(200, &body).unwrap();
        assert_eq!(err.to_string(), "AUTHENTICATION_FAILED");
        assert!(err.has_response());

        assert!(ApiError::from_error_value(200, &serde_json::json!({ "status": 1 })).is_none());
        assert!(ApiError::from_error_value(200, &serde_json::Value::Null).is_none());
    }

    #[test]
    fn not_found_and_decode_render_verbatim() {
        assert_eq!(ApiError::NotFound("Movie not found".into()).to_string(), "Movie not found");
        assert!(!ApiError::Decode("bad".into()).has_response());
    }
}
