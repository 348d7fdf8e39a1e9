//! File-to-upload import flow and session persistence across restarts.

mod common;

use common::{config_for, mint_token, movie_json};
use reelshelf::app::Event;
use reelshelf::domain::Credentials;
use reelshelf::import::ImportFile;
use reelshelf::{initialize, Config};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn data_config(server: &MockServer, dir: &tempfile::TempDir) -> Config {
    Config {
        data_dir: dir.path().to_path_buf(),
        ..config_for(server)
    }
}

async fn sign_in(server: &MockServer, config: &Config) {
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": mint_token(3, "Grace", "grace@example.com"),
            "status": 1,
        })))
        .mount(server)
        .await;

    let mut store = initialize(config).unwrap();
    let credentials = Credentials { email: "grace@example.com".into(), password: "pw".into() };
    store.dispatch_and_settle(Event::Login(credentials)).await.unwrap();
    assert!(store.state().auth.is_authenticated);
}

#[tokio::test]
async fn session_survives_a_restart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = data_config(&server, &dir);

    sign_in(&server, &config).await;
    assert!(config.token_file().exists());

    let store = initialize(&config).unwrap();
    let auth = &store.state().auth;
    assert!(auth.is_authenticated);
    assert_eq!(auth.user.as_ref().map(|u| u.email.as_str()), Some("grace@example.com"));

    let mut store = store;
    store.dispatch(Event::Logout).unwrap();
    assert!(!config.token_file().exists());
    assert!(!initialize(&config).unwrap().state().auth.is_authenticated);
}

#[tokio::test]
async fn corrupted_token_file_starts_anonymous() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = data_config(&server, &dir);
    std::fs::write(
        config.token_file(),
        r#"{"version":1,"token":"not-a-jwt","saved_at":0}"#,
    )
    .unwrap();

    let store = initialize(&config).unwrap();
    assert!(!store.state().auth.is_authenticated);
    assert!(!config.token_file().exists());
}

#[tokio::test]
async fn truncated_token_file_starts_anonymous() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = data_config(&server, &dir);
    std::fs::write(config.token_file(), "{truncated").unwrap();

    let mut store = initialize(&config).unwrap();
    assert!(!store.state().auth.is_authenticated);
    assert!(store.state().auth.user.is_none());
    assert!(!config.token_file().exists());

    store.dispatch(Event::Logout).unwrap();
    assert!(!store.state().auth.is_authenticated);
}

#[tokio::test]
async fn text_file_is_normalized_before_upload() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = data_config(&server, &dir);
    sign_in(&server, &config).await;

    Mock::given(method("POST"))
        .and(path("/movies/import"))
        .and(body_string_contains("Actors: Al Pacino, Robert De Niro\n\nTitle: Big"))
        .and(body_string_contains("Actors: Tom Hanks\n\nTitle: Alien"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [movie_json(1, "Heat"), movie_json(2, "Big"), movie_json(3, "Alien")],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = dir.path().join("movies.txt");
    std::fs::write(
        &upload,
        "\u{feff}Title: Heat\r\nYear: 1995\r\nFormat: DVD\r\nActors: Al Pacino, Robert De Niro\r\n\r\n\r\n\r\nTitle: Big\r\nYear: 1988\r\nFormat: VHS\r\nActors: Tom Hanks\r\n\r\nTitle: Alien\r\nYear: 1979\r\nFormat: Blu-ray\r\nActors: Sigourney Weaver\r\n",
    )
    .unwrap();

    let file = ImportFile::open(&upload).await.unwrap();
    assert_eq!(file.record_count(), 3);
    assert!(!file.contents().contains("\n\n\n"));

    let mut store = initialize(&config).unwrap();
    store.dispatch_and_settle(Event::ImportMovies(file)).await.unwrap();
    assert!(store.state().movies.error.is_none());
    assert_eq!(store.state().movies.movies.len(), 3);
}

#[tokio::test]
async fn rejected_upload_sets_the_movie_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = data_config(&server, &dir);
    sign_in(&server, &config).await;

    Mock::given(method("POST"))
        .and(path("/movies/import"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": { "code": "FORMAT_ERROR" } })))
        .mount(&server)
        .await;

    let mut store = initialize(&config).unwrap();
    let file = ImportFile::new("movies.txt", "Title: Heat\n");
    store.dispatch_and_settle(Event::ImportMovies(file)).await.unwrap();
    assert_eq!(
        store.state().movies.error.as_deref(),
        Some("Failed to import movies from file")
    );
    assert!(!store.state().movies.loading);
}
