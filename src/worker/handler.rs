//! Execution of the named asynchronous operations.
//!
//! The worker turns a [`WorkerMessage`] into exactly one REST call and maps
//! the outcome to a [`WorkerResponse`]. It never touches application state;
//! the store applies the response as a fulfilled or rejected transition.

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::domain::User;
use crate::worker::messages::OperationKind;
use crate::worker::{WorkerMessage, WorkerResponse};
use tracing::Instrument;

/// Message stored when the server hands out a token that does not decode.
pub const INVALID_TOKEN_MESSAGE: &str = "Received an invalid session token";

/// Stateless executor for worker messages.
///
/// Cheap to clone; every spawned operation gets its own copy.
#[derive(Debug, Clone)]
pub struct MovieWorker {
    api: ApiClient,
}

impl MovieWorker {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Maps an API result with consistent logging.
    ///
    /// The detailed error is logged here and only the stable `rejection`
    /// message travels back to the store.
    fn handle_result<T, F>(
        operation: OperationKind,
        result: ApiResult<T>,
        rejection: impl FnOnce(&ApiError) -> String,
        on_success: F,
    ) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(%operation, "operation succeeded");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(%operation, error = %e, "operation failed");
                WorkerResponse::Failed {
                    operation,
                    message: rejection(&e),
                }
            }
        }
    }

    /// Rejection message for login and registration failures.
    ///
    /// Prefers the server's own message, then a per-operation fallback when
    /// the server answered, then a generic message when it did not.
    fn auth_rejection(err: &ApiError, answered: &str, unanswered: &str) -> String {
        match err.server_message() {
            Some(message) => message.to_string(),
            None if err.has_response() => answered.to_string(),
            None => unanswered.to_string(),
        }
    }

    /// Decodes a freshly issued token, rejecting tokens without an identity.
    fn session_response(
        operation: OperationKind,
        token: String,
        into_response: impl FnOnce(String, User) -> WorkerResponse,
    ) -> WorkerResponse {
        match User::from_token(&token) {
            Ok(user) => {
                tracing::debug!(user_id = user.id, "session token decoded");
                into_response(token, user)
            }
            Err(e) => {
                tracing::warn!(%operation, error = %e, "server issued an undecodable token");
                WorkerResponse::Failed {
                    operation,
                    message: INVALID_TOKEN_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn dispatch(&self, message: WorkerMessage) -> WorkerResponse {
        let operation = message.kind();

        match message {
            WorkerMessage::Login { credentials, .. } => {
                let result = self.api.login(&credentials).await;
                Self::handle_result(
                    operation,
                    result,
                    |e| Self::auth_rejection(e, "Login failed", "An unexpected error occurred during login"),
                    |token| {
                        Self::session_response(operation, token, |token, user| {
                            WorkerResponse::LoggedIn { token, user }
                        })
                    },
                )
            }

            WorkerMessage::Register { registration, .. } => {
                let result = self.api.register(&registration).await;
                Self::handle_result(
                    operation,
                    result,
                    |e| {
                        Self::auth_rejection(
                            e,
                            "Registration failed",
                            "An unexpected error occurred during registration",
                        )
                    },
                    |token| {
                        Self::session_response(operation, token, |token, user| {
                            WorkerResponse::Registered { token, user }
                        })
                    },
                )
            }

            WorkerMessage::FetchMovies { page, limit, .. } => {
                let result = self.api.list_movies(page, limit).await;
                Self::handle_result(
                    operation,
                    result,
                    |_| "Failed to fetch movies".to_string(),
                    |movie_page| {
                        tracing::debug!(count = movie_page.movies.len(), total = movie_page.total, page, "page loaded");
                        WorkerResponse::MoviesLoaded {
                            movies: movie_page.movies,
                            total: movie_page.total,
                            page,
                        }
                    },
                )
            }

            WorkerMessage::FetchMovie { id, .. } => {
                let result = self.api.get_movie(&id).await;
                Self::handle_result(
                    operation,
                    result,
                    |_| format!("Failed to fetch movie with ID: {id}"),
                    |movie| WorkerResponse::MovieLoaded { movie },
                )
            }

            WorkerMessage::AddMovie { form, .. } => {
                let result = self.api.add_movie(&form).await;
                Self::handle_result(
                    operation,
                    result,
                    |_| "Failed to add movie".to_string(),
                    |movie| WorkerResponse::MovieAdded { movie },
                )
            }

            WorkerMessage::DeleteMovie { id, .. } => {
                let result = self.api.delete_movie(&id).await;
                Self::handle_result(
                    operation,
                    result,
                    |_| format!("Failed to delete movie with ID: {id}"),
                    |()| WorkerResponse::MovieDeleted { id: id.clone() },
                )
            }

            WorkerMessage::SearchMovies { field, query, .. } => {
                let result = self.api.search(field, &query).await;
                Self::handle_result(
                    operation,
                    result,
                    |_| format!("Failed to search movies by {field}: {query}"),
                    |movies| WorkerResponse::SearchCompleted { field, movies },
                )
            }

            WorkerMessage::ImportMovies { file, .. } => {
                let result = self.api.import_movies(&file).await;
                Self::handle_result(
                    operation,
                    result,
                    |_| "Failed to import movies from file".to_string(),
                    |movies| {
                        tracing::debug!(count = movies.len(), file_name = %file.name(), "movies imported");
                        WorkerResponse::MoviesImported { movies }
                    },
                )
            }
        }
    }

    /// Rebuilds the dispatching span's OpenTelemetry context from a message.
    fn parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }

    /// Runs one operation to completion.
    ///
    /// Opens a span parented to the dispatching span (when a trace context
    /// is present) and instruments the whole call with it.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::debug_span!("worker_handle_message", operation = %message.kind());
        if let Some(parent) = Self::parent_trace_context(&message) {
            span.set_parent(parent);
        }

        self.dispatch(message).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_rejection_prefers_server_message() {
        let err = ApiError::from_error_body(401, br#"{"error":{"message":"Wrong password"}}"#);
        assert_eq!(MovieWorker::auth_rejection(&err, "Login failed", "unexpected"), "Wrong password");

        let err = ApiError::from_error_body(401, br#"{"error":{"code":"AUTH_FAILED"}}"#);
        assert_eq!(MovieWorker::auth_rejection(&err, "Login failed", "unexpected"), "Login failed");

        let err = ApiError::Decode("no token".into());
        assert_eq!(MovieWorker::auth_rejection(&err, "Login failed", "unexpected"), "unexpected");
    }

    #[test]
    fn undecodable_tokens_become_rejections() {
        let response = MovieWorker::session_response(OperationKind::Login, "garbage".into(), |token, user| {
            WorkerResponse::LoggedIn { token, user }
        });
        assert_eq!(
            response,
            WorkerResponse::Failed {
                operation: OperationKind::Login,
                message: INVALID_TOKEN_MESSAGE.into(),
            }
        );
    }
}
