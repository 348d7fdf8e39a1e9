//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place the state tree changes. It matches the
//! dispatched [`Event`], applies the corresponding transition, and returns the
//! side effects to run.
//!
//! # Event Types
//!
//! - **Auth intents**: `Login`, `Register`, `Logout`
//! - **Movie intents**: `FetchMovies`, `FetchMovie`, `AddMovie`,
//!   `DeleteMovie`, `SearchMovies`, `ImportMovies`
//! - **Pure transitions**: `ClearFilteredMovies`, `SetCurrentMovie`,
//!   `SortMoviesByTitle`
//! - **Worker**: `WorkerResponse` settling an operation
//!
//! # Example
//!
//! ```
//! use reelshelf::app::{handle_event, AppState, AuthState, Event};
//!
//! let mut state = AppState::new(AuthState::default(), 10);
//! let (changed, actions) = handle_event(&mut state, Event::FetchMovies { page: 1 })?;
//! assert!(changed && state.movies.loading);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), reelshelf::domain::ReelshelfError>(())
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::{ReelshelfError, Result};
use crate::domain::{Credentials, Movie, Registration, SearchField, ValidatedMovieForm};
use crate::import::ImportFile;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Intents dispatched by the view and outcomes reported by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Opens a session.
    Login(Credentials),

    /// Creates an account and opens a session.
    Register(Registration),

    /// Drops the session and its durable token.
    Logout,

    /// Loads one page of the collection (1-based).
    FetchMovies { page: u32 },

    /// Loads one movie into the details slot.
    FetchMovie { id: String },

    /// Creates a movie. Only validated forms can be dispatched.
    AddMovie(ValidatedMovieForm),

    DeleteMovie { id: String },

    /// Searches on one field; results replace `filtered_movies`.
    SearchMovies { field: SearchField, query: String },

    /// Uploads a normalized import file.
    ImportMovies(ImportFile),

    ClearFilteredMovies,

    /// Opens or closes the details view.
    SetCurrentMovie(Option<Movie>),

    /// Re-sorts the loaded lists by title.
    SortMoviesByTitle,

    /// An operation settled.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// The boolean is `true` when the state tree changed and the view should
/// re-render.
///
/// # Errors
///
/// Returns [`ReelshelfError::Validation`] for intents carrying arguments the
/// store refuses (page `0`, blank ids). The state is left untouched.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(&event)).entered();

    match event {
        Event::Login(credentials) => {
            state.auth.begin();
            Ok((true, vec![Action::PostToWorker(WorkerMessage::login(credentials))]))
        }
        Event::Register(registration) => {
            state.auth.begin();
            Ok((true, vec![Action::PostToWorker(WorkerMessage::register(registration))]))
        }
        Event::Logout => {
            tracing::debug!(was_authenticated = state.auth.is_authenticated, "logging out");
            state.auth.logout();
            Ok((true, vec![Action::ClearToken]))
        }

        Event::FetchMovies { page } => {
            if page == 0 {
                return Err(ReelshelfError::Validation("page numbers start at 1".to_string()));
            }
            state.movies.begin();
            let message = WorkerMessage::fetch_movies(page, state.page_size);
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::FetchMovie { id } => {
            let id = require_id(id)?;
            state.movies.begin();
            Ok((true, vec![Action::PostToWorker(WorkerMessage::fetch_movie(id))]))
        }
        Event::AddMovie(form) => {
            state.movies.begin();
            Ok((true, vec![Action::PostToWorker(WorkerMessage::add_movie(form))]))
        }
        Event::DeleteMovie { id } => {
            let id = require_id(id)?;
            state.movies.begin();
            Ok((true, vec![Action::PostToWorker(WorkerMessage::delete_movie(id))]))
        }
        Event::SearchMovies { field, query } => {
            state.movies.begin();
            let message = WorkerMessage::search_movies(field, query);
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::ImportMovies(file) => {
            state.movies.begin();
            Ok((true, vec![Action::PostToWorker(WorkerMessage::import_movies(file))]))
        }

        Event::ClearFilteredMovies => {
            state.movies.clear_filtered();
            Ok((true, vec![]))
        }
        Event::SetCurrentMovie(movie) => {
            state.movies.set_current(movie);
            Ok((true, vec![]))
        }
        Event::SortMoviesByTitle => {
            state.movies.sort_by_title();
            Ok((true, vec![]))
        }

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

fn require_id(id: String) -> Result<String> {
    if id.trim().is_empty() {
        Err(ReelshelfError::Validation("movie id must not be empty".to_string()))
    } else {
        Ok(id)
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Login(_) => "login",
        Event::Register(_) => "register",
        Event::Logout => "logout",
        Event::FetchMovies { .. } => "fetch_movies",
        Event::FetchMovie { .. } => "fetch_movie",
        Event::AddMovie(_) => "add_movie",
        Event::DeleteMovie { .. } => "delete_movie",
        Event::SearchMovies { .. } => "search_movies",
        Event::ImportMovies(_) => "import_movies",
        Event::ClearFilteredMovies => "clear_filtered_movies",
        Event::SetCurrentMovie(_) => "set_current_movie",
        Event::SortMoviesByTitle => "sort_movies_by_title",
        Event::WorkerResponse(_) => "worker_response",
    }
}

/// Applies the fulfilled or rejected transition for a settled operation.
fn handle_worker_response(state: &mut AppState, response: WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::LoggedIn { token, user } | WorkerResponse::Registered { token, user } => {
            tracing::debug!(user_id = user.id, "session established");
            state.auth.authenticate(token.clone(), user);
            (true, vec![Action::StoreToken(token)])
        }

        WorkerResponse::MoviesLoaded { movies, total, page } => {
            tracing::debug!(count = movies.len(), total, page, "collection page applied");
            state.movies.apply_page(movies, total, page, state.page_size);
            (true, vec![])
        }
        WorkerResponse::MovieLoaded { movie } => {
            state.movies.select(movie);
            (true, vec![])
        }
        WorkerResponse::MovieAdded { movie } => {
            state.movies.append(movie);
            (true, vec![])
        }
        WorkerResponse::MovieDeleted { id } => {
            state.movies.remove(&id);
            (true, vec![])
        }
        WorkerResponse::SearchCompleted { field, movies } => {
            tracing::debug!(%field, count = movies.len(), "search results applied");
            state.movies.replace_filtered(movies);
            (true, vec![])
        }
        WorkerResponse::MoviesImported { movies } => {
            state.movies.append_all(movies);
            (true, vec![])
        }

        WorkerResponse::Failed { operation, message } => {
            tracing::debug!(%operation, %message, "operation rejected");
            if operation.is_auth() {
                state.auth.reject(message);
            } else {
                state.movies.reject(message);
            }
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AuthState;
    use crate::domain::{MovieFormat, User};
    use crate::worker::OperationKind;

    fn state() -> AppState {
        AppState::new(AuthState::default(), 10)
    }

    fn movie(id: &str) -> Movie {
        Movie {
            id: id.into(),
            title: format!("Movie {id}"),
            year: 1995,
            format: MovieFormat::BluRay,
            actors: vec!["Someone".into()],
        }
    }

    #[test]
    fn fetch_uses_configured_page_size() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, Event::FetchMovies { page: 3 }).unwrap();
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::FetchMovies { page: 3, limit: 10, .. })]
        ));
    }

    #[test]
    fn search_results_overwrite_filtered_and_leave_collection() {
        let mut state = state();
        state.movies.filtered_movies = vec![movie("a"), movie("b")];
        state.movies.movies = vec![movie("c")];

        let found = WorkerResponse::SearchCompleted { field: SearchField::Title, movies: vec![movie("d")] };
        handle_event(&mut state, Event::WorkerResponse(found)).unwrap();
        assert_eq!(state.movies.filtered_movies, vec![movie("d")]);
        assert_eq!(state.movies.movies, vec![movie("c")]);

        let none = WorkerResponse::SearchCompleted { field: SearchField::Actor, movies: vec![] };
        handle_event(&mut state, Event::WorkerResponse(none)).unwrap();
        assert!(state.movies.filtered_movies.is_empty());
        assert_eq!(state.movies.movies, vec![movie("c")]);
    }

    #[test]
    fn page_zero_is_refused_without_side_effects() {
        let mut state = state();
        let before = state.clone();
        assert!(matches!(
            handle_event(&mut state, Event::FetchMovies { page: 0 }),
            Err(ReelshelfError::Validation(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn blank_ids_are_refused() {
        let mut state = state();
        assert!(handle_event(&mut state, Event::DeleteMovie { id: " ".into() }).is_err());
        assert!(!state.movies.loading);
    }

    #[test]
    fn page_response_updates_pagination() {
        let mut state = state();
        handle_event(&mut state, Event::FetchMovies { page: 2 }).unwrap();
        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::MoviesLoaded {
                movies: (1..=10).map(|i| movie(&i.to_string())).collect(),
                total: 25,
                page: 2,
            }),
        )
        .unwrap();

        assert_eq!(state.movies.current_page, 2);
        assert_eq!(state.movies.total_pages, 3);
        assert_eq!(state.movies.total_movies, 25);
        assert!(!state.movies.loading);
    }

    #[test]
    fn rejections_land_in_the_matching_slice() {
        let mut state = state();
        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Failed {
                operation: OperationKind::Login,
                message: "Invalid credentials".into(),
            }),
        )
        .unwrap();
        assert_eq!(state.auth.error.as_deref(), Some("Invalid credentials"));
        assert!(state.movies.error.is_none());

        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Failed {
                operation: OperationKind::AddMovie,
                message: "Failed to add movie".into(),
            }),
        )
        .unwrap();
        assert_eq!(state.movies.error.as_deref(), Some("Failed to add movie"));
    }

    #[test]
    fn login_success_persists_the_token() {
        let mut state = state();
        let user = User { id: 5, name: "Lin".into(), email: "lin@example.com".into() };
        let (_, actions) = handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::LoggedIn { token: "tok".into(), user: user.clone() }),
        )
        .unwrap();

        assert_eq!(actions, vec![Action::StoreToken("tok".into())]);
        assert!(state.auth.is_authenticated);
        assert_eq!(state.auth.user, Some(user));
    }

    #[test]
    fn logout_clears_identity_and_token() {
        let user = User { id: 5, name: "Lin".into(), email: "lin@example.com".into() };
        let mut state = AppState::new(AuthState::restored("tok".into(), user), 10);
        let (_, actions) = handle_event(&mut state, Event::Logout).unwrap();

        assert_eq!(actions, vec![Action::ClearToken]);
        assert!(!state.auth.is_authenticated);
        assert!(state.auth.token.is_none() && state.auth.user.is_none());
    }

    #[test]
    fn pure_transitions_emit_no_actions() {
        let mut state = state();
        state.movies.filtered_movies = vec![movie("1")];

        let (_, actions) = handle_event(&mut state, Event::SetCurrentMovie(Some(movie("1")))).unwrap();
        assert!(actions.is_empty());
        assert!(state.movies.current_movie.is_some());

        handle_event(&mut state, Event::ClearFilteredMovies).unwrap();
        assert!(state.movies.filtered_movies.is_empty());
        assert!(state.movies.current_movie.is_some());
    }
}
