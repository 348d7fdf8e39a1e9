//! Operation request and response types.
//!
//! This module defines the protocol between the state store and the
//! background operations that call the REST service. Each request carries the
//! dispatching span's trace context so worker spans link back to the intent
//! that started them.

use crate::domain::{Credentials, Movie, Registration, SearchField, User, ValidatedMovieForm};
use crate::import::ImportFile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distributed tracing context for linking operation spans to their caller.
///
/// Captures the current trace and span IDs from OpenTelemetry so the span
/// opened by the worker can name the dispatching span as its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current
    /// span context is otherwise invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("span context is not valid");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates builder methods for `WorkerMessage` variants.
///
/// Each builder attaches the current trace context to the message.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    login(Login { credentials: Credentials }),
    register(Register { registration: Registration }),
    fetch_movies(FetchMovies { page: u32, limit: u32 }),
    fetch_movie(FetchMovie { id: String }),
    add_movie(AddMovie { form: ValidatedMovieForm }),
    delete_movie(DeleteMovie { id: String }),
    search_movies(SearchMovies { field: SearchField, query: String }),
    import_movies(ImportMovies { file: ImportFile }),
}

/// The named asynchronous operations.
///
/// Each one maps to exactly one API call and one family of state
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Login,
    Register,
    FetchMovies,
    FetchMovie,
    AddMovie,
    DeleteMovie,
    SearchMovies,
    ImportMovies,
}

impl OperationKind {
    /// Whether the operation settles into the auth slice.
    #[must_use]
    pub const fn is_auth(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::FetchMovies => "fetch movies",
            Self::FetchMovie => "fetch movie",
            Self::AddMovie => "add movie",
            Self::DeleteMovie => "delete movie",
            Self::SearchMovies => "search movies",
            Self::ImportMovies => "import movies",
        };
        f.write_str(name)
    }
}

/// Requests handed to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Open a session with email and password.
    Login {
        credentials: Credentials,
        trace_context: Option<TraceContext>,
    },

    /// Create an account and open a session for it.
    Register {
        registration: Registration,
        trace_context: Option<TraceContext>,
    },

    /// Load one page of the collection.
    FetchMovies {
        /// 1-based page number.
        page: u32,
        /// Page size.
        limit: u32,
        trace_context: Option<TraceContext>,
    },

    /// Load a single movie for the details view.
    FetchMovie {
        id: String,
        trace_context: Option<TraceContext>,
    },

    /// Create a movie from a validated form.
    AddMovie {
        form: ValidatedMovieForm,
        trace_context: Option<TraceContext>,
    },

    /// Delete a movie.
    DeleteMovie {
        id: String,
        trace_context: Option<TraceContext>,
    },

    /// Search by title or actor.
    SearchMovies {
        field: SearchField,
        query: String,
        trace_context: Option<TraceContext>,
    },

    /// Upload a normalized import file.
    ImportMovies {
        file: ImportFile,
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The operation this message requests.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Login { .. } => OperationKind::Login,
            Self::Register { .. } => OperationKind::Register,
            Self::FetchMovies { .. } => OperationKind::FetchMovies,
            Self::FetchMovie { .. } => OperationKind::FetchMovie,
            Self::AddMovie { .. } => OperationKind::AddMovie,
            Self::DeleteMovie { .. } => OperationKind::DeleteMovie,
            Self::SearchMovies { .. } => OperationKind::SearchMovies,
            Self::ImportMovies { .. } => OperationKind::ImportMovies,
        }
    }

    /// Trace context captured when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Login { trace_context, .. }
            | Self::Register { trace_context, .. }
            | Self::FetchMovies { trace_context, .. }
            | Self::FetchMovie { trace_context, .. }
            | Self::AddMovie { trace_context, .. }
            | Self::DeleteMovie { trace_context, .. }
            | Self::SearchMovies { trace_context, .. }
            | Self::ImportMovies { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Outcomes reported by the worker.
///
/// Every request produces exactly one response: a success variant carrying
/// the data for the fulfilled transition, or [`WorkerResponse::Failed`]
/// carrying the caller-presentable rejection message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// Session opened; the token decoded into `user`.
    LoggedIn { token: String, user: User },

    /// Account created and session opened.
    Registered { token: String, user: User },

    /// A page of the collection arrived.
    MoviesLoaded {
        movies: Vec<Movie>,
        total: u64,
        page: u32,
    },

    /// A single movie arrived.
    MovieLoaded { movie: Movie },

    /// The server created a movie.
    MovieAdded { movie: Movie },

    /// The server deleted a movie.
    MovieDeleted { id: String },

    /// Search results arrived.
    SearchCompleted { field: SearchField, movies: Vec<Movie> },

    /// The server imported movies from a file.
    MoviesImported { movies: Vec<Movie> },

    /// The operation failed.
    Failed {
        operation: OperationKind,
        message: String,
    },
}

impl WorkerResponse {
    /// The operation that produced this response.
    #[must_use]
    pub const fn operation(&self) -> OperationKind {
        match self {
            Self::LoggedIn { .. } => OperationKind::Login,
            Self::Registered { .. } => OperationKind::Register,
            Self::MoviesLoaded { .. } => OperationKind::FetchMovies,
            Self::MovieLoaded { .. } => OperationKind::FetchMovie,
            Self::MovieAdded { .. } => OperationKind::AddMovie,
            Self::MovieDeleted { .. } => OperationKind::DeleteMovie,
            Self::SearchCompleted { .. } => OperationKind::SearchMovies,
            Self::MoviesImported { .. } => OperationKind::ImportMovies,
            Self::Failed { operation, .. } => *operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_fill_fields_without_a_tracer() {
        let message = WorkerMessage::fetch_movies(2, 10);
        assert_eq!(message.kind(), OperationKind::FetchMovies);
        assert!(message.trace_context().is_none());
        assert!(matches!(message, WorkerMessage::FetchMovies { page: 2, limit: 10, .. }));
    }

    #[test]
    fn failed_responses_report_their_operation() {
        let response = WorkerResponse::Failed {
            operation: OperationKind::DeleteMovie,
            message: "Failed to delete movie with ID: 4".into(),
        };
        assert_eq!(response.operation(), OperationKind::DeleteMovie);
        assert!(!response.operation().is_auth());
        assert!(OperationKind::Register.is_auth());
    }
}
