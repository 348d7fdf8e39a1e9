//! Reactions the view performs when the state tree changes.
//!
//! These are not transitions; they translate a change the view observed into
//! the next event to dispatch, keeping the store itself free of follow-up
//! logic.

use crate::app::Event;
use crate::worker::WorkerResponse;

/// Event to dispatch after `is_authenticated` changed to `is_authenticated`.
///
/// Signing in loads the first page. Signing out only drops search results;
/// nothing is fetched for an anonymous user.
#[must_use]
pub const fn on_auth_changed(is_authenticated: bool) -> Event {
    if is_authenticated {
        Event::FetchMovies { page: 1 }
    } else {
        Event::ClearFilteredMovies
    }
}

/// Follow-up for a settled import: refresh page 1 and report the count.
///
/// Returns `None` for anything other than a successful import.
#[must_use]
pub fn after_import(response: &WorkerResponse) -> Option<(Event, String)> {
    match response {
        WorkerResponse::MoviesImported { movies } => Some((
            Event::FetchMovies { page: 1 },
            format!("Movies imported successfully! ({} movies)", movies.len()),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::OperationKind;

    #[test]
    fn auth_changes_map_to_fetch_or_clear() {
        assert_eq!(on_auth_changed(true), Event::FetchMovies { page: 1 });
        assert_eq!(on_auth_changed(false), Event::ClearFilteredMovies);
    }

    #[test]
    fn only_successful_imports_trigger_a_refresh() {
        let (event, notice) =
            after_import(&WorkerResponse::MoviesImported { movies: vec![] }).unwrap();
        assert_eq!(event, Event::FetchMovies { page: 1 });
        assert_eq!(notice, "Movies imported successfully! (0 movies)");

        let failed = WorkerResponse::Failed {
            operation: OperationKind::ImportMovies,
            message: "Failed to import movies".into(),
        };
        assert!(after_import(&failed).is_none());
    }
}
