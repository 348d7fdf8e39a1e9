//! The state store: state tree, side-effect execution, and in-flight
//! operations.
//!
//! A [`Store`] is an explicit container, created once and passed to the view.
//! [`Store::dispatch`] applies an event synchronously and starts any
//! operations it requests on their own tasks; [`Store::next_settled`] waits for
//! the next one to finish and applies its outcome. Because both take
//! `&mut self`, every transition is applied atomically.

use crate::api::ApiClient;
use crate::app::handler::{handle_event, Event};
use crate::app::state::{AppState, AuthState};
use crate::app::Action;
use crate::domain::error::{ReelshelfError, Result};
use crate::domain::User;
use crate::storage::TokenStore;
use crate::worker::{MovieWorker, WorkerResponse};
use crate::Config;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Auth error shown when a new session could not be written to the token store.
pub const SESSION_NOT_SAVED_MESSAGE: &str =
    "Signed in, but the session could not be saved and will end when reelshelf exits";

/// Owner of the state tree and everything that may change it.
pub struct Store {
    state: AppState,
    tokens: Box<dyn TokenStore>,
    credential: watch::Sender<Option<String>>,
    worker: MovieWorker,
    tasks: JoinSet<WorkerResponse>,
}

impl Store {
    /// Creates a store, restoring the session held by `tokens`.
    ///
    /// A stored token that does not decode into a user identity is discarded
    /// and the store starts anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read, or cannot be
    /// cleared after holding an undecodable token.
    pub fn new(config: &Config, mut tokens: Box<dyn TokenStore>) -> Result<Self> {
        let _span = tracing::debug_span!("store_new", api_url = %config.api_url).entered();

        let auth = match tokens.load()? {
            Some(token) => match User::from_token(&token) {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "restored stored session");
                    AuthState::restored(token, user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding stored token that does not decode");
                    tokens.clear()?;
                    AuthState::default()
                }
            },
            None => AuthState::default(),
        };

        let (credential, receiver) = watch::channel(auth.token.clone());
        let worker = MovieWorker::new(ApiClient::new(&config.api_url, receiver));

        Ok(Self {
            state: AppState::new(auth, config.page_size),
            tokens,
            credential,
            worker,
            tasks: JoinSet::new(),
        })
    }

    /// Read-only view of the state tree.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of operations started but not yet applied.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Applies an event and runs the side effects it requests.
    ///
    /// Operations are spawned onto the current Tokio runtime and must be
    /// collected with [`Store::next_settled`] or [`Store::settle`]. Returns
    /// whether the state changed.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime and the event starts an
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns [`ReelshelfError::Validation`] for refused intents, leaving the
    /// state untouched.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (changed, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(changed)
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                tracing::debug!(operation = %message.kind(), in_flight = self.tasks.len(), "starting operation");
                let worker = self.worker.clone();
                self.tasks.spawn(async move { worker.handle_message(message).await });
            }
            Action::StoreToken(token) => {
                if let Err(e) = self.tokens.save(&token) {
                    tracing::error!(error = %e, "failed to persist session token");
                    self.state.auth.error = Some(SESSION_NOT_SAVED_MESSAGE.to_string());
                }
                self.credential.send_replace(Some(token));
            }
            Action::ClearToken => {
                if let Err(e) = self.tokens.clear() {
                    tracing::error!(error = %e, "failed to clear stored session token");
                }
                self.credential.send_replace(None);
            }
        }
    }

    /// Waits for the next operation to finish and applies its outcome.
    ///
    /// Returns `None` when nothing is in flight. The returned response is
    /// the one that was applied.
    ///
    /// # Errors
    ///
    /// Returns [`ReelshelfError::Worker`] if the operation's task panicked.
    pub async fn next_settled(&mut self) -> Option<Result<WorkerResponse>> {
        let joined = self.tasks.join_next().await?;
        let settled = match joined {
            Ok(response) => self
                .dispatch(Event::WorkerResponse(response.clone()))
                .map(|_| response),
            Err(e) => {
                tracing::error!(error = %e, "operation task did not complete");
                Err(ReelshelfError::Worker(e.to_string()))
            }
        };
        Some(settled)
    }

    /// Applies every in-flight operation, in the order they finish.
    ///
    /// # Errors
    ///
    /// Stops at the first task that did not complete.
    pub async fn settle(&mut self) -> Result<Vec<WorkerResponse>> {
        let mut responses = Vec::with_capacity(self.tasks.len());
        while let Some(settled) = self.next_settled().await {
            responses.push(settled?);
        }
        Ok(responses)
    }

    /// Dispatches an event and waits for everything in flight to settle.
    ///
    /// # Errors
    ///
    /// See [`Store::dispatch`] and [`Store::settle`].
    pub async fn dispatch_and_settle(&mut self, event: Event) -> Result<Vec<WorkerResponse>> {
        self.dispatch(event)?;
        self.settle().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    fn config() -> Config {
        Config {
            api_url: "http://127.0.0.1:9".into(),
            ..Config::default()
        }
    }

    #[test]
    fn undecodable_stored_token_is_discarded() {
        let tokens = MemoryTokenStore::with_token("not-a-jwt");
        let store = Store::new(&config(), Box::new(tokens.clone())).unwrap();

        assert!(!store.state().auth.is_authenticated);
        assert!(store.state().auth.token.is_none());
        assert_eq!(tokens.token(), None);
    }

    #[test]
    fn starts_anonymous_without_a_token() {
        let store = Store::new(&config(), Box::new(MemoryTokenStore::new())).unwrap();
        assert_eq!(store.state().auth, AuthState::default());
        assert_eq!(store.state().page_size, 10);
        assert_eq!(store.in_flight(), 0);
    }

    struct ReadOnlyTokens;

    impl TokenStore for ReadOnlyTokens {
        fn load(&self) -> Result<Option<String>> {
            Ok(None)
        }

        fn save(&mut self, _token: &str) -> Result<()> {
            Err(ReelshelfError::Storage("read-only file system".into()))
        }

        fn clear(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unsaved_session_is_reported_but_still_used() {
        let mut store = Store::new(&config(), Box::new(ReadOnlyTokens)).unwrap();

        store.execute(Action::StoreToken("tok".into()));

        assert_eq!(store.state().auth.error.as_deref(), Some(SESSION_NOT_SAVED_MESSAGE));
        assert_eq!(store.credential.borrow().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn logout_clears_the_durable_token() {
        let tokens = MemoryTokenStore::with_token("stale");
        let mut store = Store::new(&config(), Box::new(MemoryTokenStore::new())).unwrap();
        store.tokens = Box::new(tokens.clone());

        store.dispatch(Event::Logout).unwrap();
        assert_eq!(tokens.token(), None);
        assert!(store.settle().await.unwrap().is_empty());
    }
}
