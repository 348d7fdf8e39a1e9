//! Top-level rendering coordinator.
//!
//! Turns view models and movies into plain text for the terminal. Nothing
//! here prints; callers decide where the text goes.
//!
//! # Example
//!
//! ```
//! use reelshelf::app::{AppState, AuthState, ListMode};
//! use reelshelf::ui::render;
//!
//! let state = AppState::new(AuthState::default(), 10);
//! let text = render(&state.compute_viewmodel(ListMode::Collection));
//! assert!(text.starts_with("Your Movie Collection (0 movies found)"));
//! assert!(text.contains("No movies in your collection yet"));
//! ```

use crate::domain::Movie;
use crate::ui::components;
use crate::ui::viewmodel::CollectionViewModel;
use std::fmt::Write;

/// Renders the collection or search-results screen.
#[must_use]
pub fn render(vm: &CollectionViewModel) -> String {
    let mut out = String::new();
    components::render_collection(&mut out, vm);
    out
}

/// Renders the details view of one movie.
///
/// ```text
/// Casablanca
///   ID:     7
///   Year:   1942
///   Format: DVD
///   Actors: Humphrey Bogart, Ingrid Bergman
/// ```
#[must_use]
pub fn render_movie(movie: &Movie) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(out, "  ID:     {}", movie.id);
    let _ = writeln!(out, "  Year:   {}", movie.year);
    let _ = writeln!(out, "  Format: {}", movie.format);
    let actors = if movie.actors.is_empty() {
        "(none listed)".to_string()
    } else {
        movie.actors.join(", ")
    };
    let _ = writeln!(out, "  Actors: {actors}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, AuthState, ListMode};
    use crate::domain::{MovieFormat, User};

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.into(),
            title: title.into(),
            year: 1994,
            format: MovieFormat::BluRay,
            actors: vec!["Tom Hanks".into(), "Robin Wright".into()],
        }
    }

    #[test]
    fn collection_lists_rows_and_pagination() {
        let user = User { id: 1, name: "Ada".into(), email: "ada@example.com".into() };
        let mut state = AppState::new(AuthState::restored("tok".into(), user), 10);
        state.movies.apply_page(vec![movie("1", "Forrest Gump")], 25, 2, 10);
        state.movies.set_current(Some(movie("1", "Forrest Gump")));

        let text = render(&state.compute_viewmodel(ListMode::Collection));
        assert!(text.contains("Your Movie Collection (25 movies found)"));
        assert!(text.contains("Welcome, Ada"));
        assert!(text.contains("> 1"));
        assert!(text.contains("Blu-ray"));
        assert!(text.contains("Tom Hanks, Robin Wright"));
        assert!(text.contains("Page 2 of 3"));
        assert!(text.contains("next: --page 3"));
    }

    #[test]
    fn search_results_have_no_pagination() {
        let mut state = AppState::new(AuthState::default(), 10);
        state.movies.replace_filtered(vec![movie("4", "Cast Away")]);
        state.movies.total_pages = 5;

        let text = render(&state.compute_viewmodel(ListMode::SearchResults));
        assert!(text.starts_with("Search Results (1 movie found)"));
        assert!(!text.contains("Page "));
    }

    #[test]
    fn errors_are_shown_above_the_list() {
        let mut state = AppState::new(AuthState::default(), 10);
        state.movies.reject("Failed to fetch movies".into());
        let text = render(&state.compute_viewmodel(ListMode::Collection));
        assert!(text.contains("Error: Failed to fetch movies"));
    }

    #[test]
    fn details_view_lists_every_field() {
        let text = render_movie(&movie("9", "Big"));
        assert!(text.starts_with("Big\n"));
        assert!(text.contains("Year:   1994"));
        assert!(text.contains("Actors: Tom Hanks, Robin Wright"));
    }
}
