//! Application state tree and its transitions.
//!
//! [`AppState`] is the single source of truth for the client: an auth slice
//! and a movies slice. Every mutation goes through one of the transition
//! methods below, which the event handler calls in response to dispatched
//! events and worker responses. The tree is plain data and serializes as-is.
//!
//! # Shared status slots
//!
//! All movie operations share one `loading` flag and one `error` slot. When
//! several operations overlap, whichever settles last decides both.

use super::modes::{AuthPhase, ListMode};
use crate::domain::{Movie, User};
use crate::ui::viewmodel::{CollectionViewModel, EmptyState, HeaderInfo, MovieRow, PaginationInfo};
use serde::Serialize;
use std::cmp::Ordering;

/// Authentication slice.
///
/// `is_authenticated` is true exactly when a token is held, and a held token
/// always decoded into `user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Restores a session from a token whose identity already decoded.
    #[must_use]
    pub fn restored(token: String, user: User) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            loading: false,
            error: None,
        }
    }

    /// Current phase of the auth state machine.
    #[must_use]
    pub const fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Pending
        } else if self.is_authenticated {
            AuthPhase::Authenticated
        } else if self.error.is_some() {
            AuthPhase::Error
        } else {
            AuthPhase::Anonymous
        }
    }

    /// Login or registration started.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Login or registration succeeded.
    pub fn authenticate(&mut self, token: String, user: User) {
        self.loading = false;
        self.token = Some(token);
        self.user = Some(user);
        self.is_authenticated = true;
    }

    /// Login or registration failed; any existing session is left alone.
    pub fn reject(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Drops the session unconditionally.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.error = None;
    }
}

/// Movie collection slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoviesState {
    pub movies: Vec<Movie>,
    pub filtered_movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_movie: Option<Movie>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_movies: u64,
}

impl Default for MoviesState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            filtered_movies: Vec::new(),
            loading: false,
            error: None,
            current_movie: None,
            current_page: 1,
            total_pages: 0,
            total_movies: 0,
        }
    }
}

/// Orders titles case-insensitively, falling back to a byte comparison so
/// the order is total.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl MoviesState {
    /// Any movie operation started.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Any movie operation failed. Nothing else is touched.
    pub fn reject(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    fn fulfil(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// A page arrived: replaces the collection and pagination counters.
    pub fn apply_page(&mut self, movies: Vec<Movie>, total: u64, page: u32, page_size: u32) {
        self.fulfil();
        self.movies = movies;
        self.total_movies = total;
        self.current_page = page;
        self.total_pages = total.div_ceil(u64::from(page_size.max(1)));
    }

    /// A single movie arrived for the details view.
    pub fn select(&mut self, movie: Movie) {
        self.fulfil();
        self.current_movie = Some(movie);
    }

    /// A created movie is appended; pagination counters are left alone.
    pub fn append(&mut self, movie: Movie) {
        self.fulfil();
        self.movies.push(movie);
    }

    /// Imported movies are appended in server order.
    pub fn append_all(&mut self, movies: Vec<Movie>) {
        self.fulfil();
        self.movies.extend(movies);
    }

    /// A movie was deleted on the server.
    pub fn remove(&mut self, id: &str) {
        self.fulfil();
        self.movies.retain(|movie| movie.id != id);
        self.filtered_movies.retain(|movie| movie.id != id);
        if self.current_movie.as_ref().is_some_and(|movie| movie.id == id) {
            self.current_movie = None;
        }
    }

    /// Search results replace the previous ones wholesale.
    pub fn replace_filtered(&mut self, movies: Vec<Movie>) {
        self.fulfil();
        self.filtered_movies = movies;
    }

    pub fn clear_filtered(&mut self) {
        self.filtered_movies.clear();
    }

    pub fn set_current(&mut self, movie: Option<Movie>) {
        self.current_movie = movie;
    }

    /// Sorts the collection, and the search results when present, by title.
    pub fn sort_by_title(&mut self) {
        self.movies.sort_by(|a, b| compare_titles(&a.title, &b.title));
        if !self.filtered_movies.is_empty() {
            self.filtered_movies
                .sort_by(|a, b| compare_titles(&a.title, &b.title));
        }
    }
}

/// Root of the state tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub auth: AuthState,
    pub movies: MoviesState,

    /// Page size used for list requests and `total_pages`.
    #[serde(skip)]
    pub page_size: u32,
}

impl AppState {
    /// Creates a state tree with the given auth slice and an empty collection.
    #[must_use]
    pub fn new(auth: AuthState, page_size: u32) -> Self {
        Self {
            auth,
            movies: MoviesState::default(),
            page_size,
        }
    }

    /// Computes the collection view for the given list mode.
    ///
    /// # Example
    ///
    /// ```
    /// use reelshelf::app::{AppState, AuthState, ListMode};
    ///
    /// let state = AppState::new(AuthState::default(), 10);
    /// let view = state.compute_viewmodel(ListMode::Collection);
    /// assert_eq!(view.header.title, "Your Movie Collection");
    /// assert_eq!(view.header.count_label, "0 movies found");
    /// assert!(view.empty_state.is_some());
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, mode: ListMode) -> CollectionViewModel {
        let (title, list, count) = match mode {
            ListMode::Collection => (
                "Your Movie Collection",
                &self.movies.movies,
                self.movies.total_movies,
            ),
            ListMode::SearchResults => (
                "Search Results",
                &self.movies.filtered_movies,
                list_len(&self.movies.filtered_movies),
            ),
        };

        let selected_id = self.movies.current_movie.as_ref().map(|movie| movie.id.as_str());
        let rows: Vec<MovieRow> = list
            .iter()
            .map(|movie| MovieRow::from_movie(movie, selected_id == Some(movie.id.as_str())))
            .collect();

        let empty_state = (rows.is_empty() && !self.movies.loading).then(|| match mode {
            ListMode::Collection => EmptyState {
                message: "No movies in your collection yet".to_string(),
                subtitle: "Add a movie or import a file to get started".to_string(),
            },
            ListMode::SearchResults => EmptyState {
                message: "No movies found".to_string(),
                subtitle: "Try a different title or actor".to_string(),
            },
        });

        let pagination = (mode == ListMode::Collection && self.movies.total_pages > 1).then(|| {
            PaginationInfo {
                current_page: self.movies.current_page,
                total_pages: self.movies.total_pages,
            }
        });

        CollectionViewModel {
            header: HeaderInfo {
                title: title.to_string(),
                count_label: format!("{count} {} found", if count == 1 { "movie" } else { "movies" }),
                welcome: self.auth.user.as_ref().map(|user| format!("Welcome, {}", user.name)),
            },
            rows,
            loading: self.movies.loading,
            error: self.movies.error.clone(),
            pagination,
            empty_state,
        }
    }
}

fn list_len(movies: &[Movie]) -> u64 {
    u64::try_from(movies.len()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieFormat;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.into(),
            title: title.into(),
            year: 1990,
            format: MovieFormat::Dvd,
            actors: vec![],
        }
    }

    fn user() -> User {
        User { id: 1, name: "Ada".into(), email: "ada@example.com".into() }
    }

    #[test]
    fn initial_movies_state_matches_defaults() {
        let state = MoviesState::default();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.total_movies, 0);
        assert!(!state.loading);
    }

    #[test]
    fn page_counters_round_up() {
        let mut state = MoviesState::default();
        state.begin();
        state.apply_page(vec![movie("1", "A")], 25, 2, 10);
        assert_eq!((state.current_page, state.total_pages, state.total_movies), (2, 3, 25));
        assert!(!state.loading);

        state.apply_page(vec![], 0, 1, 10);
        assert_eq!(state.total_pages, 0);

        state.apply_page(vec![], 20, 1, 10);
        assert_eq!(state.total_pages, 2);
    }

    #[test]
    fn rejection_keeps_data() {
        let mut state = MoviesState::default();
        state.apply_page(vec![movie("1", "A")], 1, 1, 10);
        state.begin();
        state.reject("Failed to fetch movies".into());

        assert_eq!(state.movies.len(), 1);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch movies"));
        assert!(!state.loading);

        state.begin();
        assert!(state.error.is_none());
    }

    #[test]
    fn remove_touches_both_lists_and_selection() {
        let mut state = MoviesState::default();
        state.movies = vec![movie("1", "A"), movie("2", "B")];
        state.filtered_movies = vec![movie("2", "B")];
        state.current_movie = Some(movie("2", "B"));

        state.remove("2");
        assert_eq!(state.movies, vec![movie("1", "A")]);
        assert!(state.filtered_movies.is_empty());
        assert!(state.current_movie.is_none());

        state.current_movie = Some(movie("1", "A"));
        state.remove("9");
        assert!(state.current_movie.is_some());
    }

    #[test]
    fn append_leaves_pagination_alone() {
        let mut state = MoviesState::default();
        state.apply_page(vec![movie("1", "A")], 11, 1, 10);
        state.append(movie("2", "B"));
        state.append_all(vec![movie("3", "C"), movie("4", "D")]);

        assert_eq!(state.movies.len(), 4);
        assert_eq!((state.total_movies, state.total_pages), (11, 2));
    }

    #[test]
    fn sorting_ignores_case() {
        let mut state = MoviesState::default();
        state.movies = vec![movie("1", "casablanca"), movie("2", "Alien"), movie("3", "Brazil")];
        state.sort_by_title();
        let titles: Vec<_> = state.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Brazil", "casablanca"]);
        assert!(state.filtered_movies.is_empty());
    }

    #[test]
    fn auth_transitions_follow_the_phases() {
        let mut auth = AuthState::default();
        assert_eq!(auth.phase(), AuthPhase::Anonymous);

        auth.begin();
        assert_eq!(auth.phase(), AuthPhase::Pending);

        auth.reject("Invalid credentials".into());
        assert_eq!(auth.phase(), AuthPhase::Error);
        assert!(!auth.is_authenticated);

        auth.begin();
        assert!(auth.error.is_none());
        auth.authenticate("t".into(), user());
        assert_eq!(auth.phase(), AuthPhase::Authenticated);
        assert!(auth.user.is_some());

        auth.logout();
        assert_eq!(auth, AuthState::default());
    }

    #[test]
    fn search_view_counts_results() {
        let mut state = AppState::new(AuthState::restored("t".into(), user()), 10);
        state.movies.apply_page(vec![movie("1", "A")], 42, 1, 10);
        state.movies.replace_filtered(vec![movie("1", "A")]);

        let collection = state.compute_viewmodel(ListMode::Collection);
        assert_eq!(collection.header.count_label, "42 movies found");
        assert_eq!(collection.header.welcome.as_deref(), Some("Welcome, Ada"));
        assert_eq!(collection.pagination.map(|p| p.total_pages), Some(5));

        let search = state.compute_viewmodel(ListMode::SearchResults);
        assert_eq!(search.header.title, "Search Results");
        assert_eq!(search.header.count_label, "1 movie found");
        assert!(search.pagination.is_none());
    }

    #[test]
    fn state_tree_serializes() {
        let state = AppState::new(AuthState::default(), 10);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["movies"]["current_page"], 1);
        assert!(json.get("page_size").is_none());
    }
}
