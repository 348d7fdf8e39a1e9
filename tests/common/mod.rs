//! Shared helpers for integration tests.

#![allow(dead_code)]

use jsonwebtoken::{encode, EncodingKey, Header};
use reelshelf::app::Store;
use reelshelf::domain::User;
use reelshelf::storage::MemoryTokenStore;
use reelshelf::Config;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Signs a session token the way the movies service would.
pub fn mint_token(id: i64, name: &str, email: &str) -> String {
    let user = User { id, name: name.to_string(), email: email.to_string() };
    encode(&Header::default(), &user, &EncodingKey::from_secret(b"server-secret"))
        .expect("token encodes")
}

pub fn movie_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "year": 1994,
        "format": "DVD",
        "actors": [{ "id": id * 10, "name": "Tom Hanks" }],
    })
}

pub fn config_for(server: &MockServer) -> Config {
    Config {
        api_url: server.uri(),
        ..Config::default()
    }
}

/// A store talking to `server`, with no saved session.
pub fn anonymous_store(server: &MockServer) -> (Store, MemoryTokenStore) {
    let tokens = MemoryTokenStore::new();
    let store = Store::new(&config_for(server), Box::new(tokens.clone())).expect("store starts");
    (store, tokens)
}

/// A store talking to `server`, restored from a saved session.
pub fn signed_in_store(server: &MockServer) -> (Store, MemoryTokenStore, String) {
    let token = mint_token(7, "Ada", "ada@example.com");
    let tokens = MemoryTokenStore::with_token(&token);
    let store = Store::new(&config_for(server), Box::new(tokens.clone())).expect("store starts");
    (store, tokens, token)
}
