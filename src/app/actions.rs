//! Side effects requested by the event handler.
//!
//! The handler only mutates the state tree; anything that touches the
//! outside world is returned as an [`Action`] and executed by the
//! [`Store`](crate::app::Store) in order.
//!
//! # Example
//!
//! ```
//! use reelshelf::app::Action;
//! use reelshelf::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::fetch_movies(1, 10))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts an asynchronous operation on its own task.
    PostToWorker(WorkerMessage),

    /// Persists a freshly issued token and starts sending it with requests.
    StoreToken(String),

    /// Forgets the durable token and stops sending a credential.
    ClearToken,
}
