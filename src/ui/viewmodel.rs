//! View model types representing renderable state.
//!
//! View models are computed from the state tree by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They contain no business logic, only
//! display-ready data.

use crate::domain::Movie;

/// Everything needed to draw the collection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionViewModel {
    pub header: HeaderInfo,

    /// Rows of the list currently shown (collection or search results).
    pub rows: Vec<MovieRow>,

    pub loading: bool,

    /// Last movie-operation error, shown above the list.
    pub error: Option<String>,

    /// Present only for a multi-page collection.
    pub pagination: Option<PaginationInfo>,

    /// Present when there is nothing to list and nothing loading.
    pub empty_state: Option<EmptyState>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// "Your Movie Collection" or "Search Results".
    pub title: String,

    /// For example "3 movies found".
    pub count_label: String,

    /// Greeting for the signed-in user.
    pub welcome: Option<String>,
}

/// One line of the movie table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub format: String,
    pub actors: String,

    /// Whether this movie is open in the details view.
    pub is_selected: bool,
}

impl MovieRow {
    #[must_use]
    pub fn from_movie(movie: &Movie, is_selected: bool) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year,
            format: movie.format.to_string(),
            actors: movie.actors.join(", "),
            is_selected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u64,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No movies found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
