//! HTTP client for the movies REST service.

use super::error::ApiError;
use super::wire::{self, CreateMovieRequest, MoviePage, SessionResponse};
use crate::domain::{Credentials, Movie, Registration, SearchField, ValidatedMovieForm};
use crate::import::ImportFile;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::watch;

/// Result of an API call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Typed client for the movies service.
///
/// The credential is shared with the state store through a [`watch`]
/// channel: whatever token the store holds at the moment a request is built
/// is sent verbatim in the `Authorization` header. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credential: watch::Receiver<Option<String>>,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (for example
    /// `http://localhost:8000/api/v1`).
    ///
    /// Requests carry no timeout: a dispatched call runs until the server
    /// answers or the connection fails.
    pub fn new(base_url: &str, credential: watch::Receiver<Option<String>>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.credential.borrow().clone();
        match token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    /// Sends a request and returns the decoded success body.
    ///
    /// Non-success statuses become [`ApiError::Server`]. A success body that
    /// is empty or not JSON decodes to `Value::Null`, which every envelope
    /// reader treats as "absent".
    async fn send(&self, request: RequestBuilder) -> ApiResult<Value> {
        self.send_with_status(request).await.map(|(_, body)| body)
    }

    async fn send_with_status(&self, request: RequestBuilder) -> ApiResult<(u16, Value)> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = ApiError::from_error_body(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), error = %err, "request rejected by server");
            return Err(err);
        }

        tracing::trace!(status = status.as_u16(), bytes = body.len(), "request succeeded");
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
        Ok((status.as_u16(), body))
    }

    /// Reads the token from a session response.
    ///
    /// A success body without a token but with an `error` envelope is the
    /// server declining the request, not a malformed payload.
    fn session_token(status: u16, body: &Value) -> ApiResult<String> {
        if let Ok(session) = SessionResponse::deserialize(body) {
            return Ok(session.token);
        }
        match ApiError::from_error_value(status, body) {
            Some(err) => {
                tracing::debug!(status, error = %err, "session refused in a success response");
                Err(err)
            }
            None => Err(ApiError::Decode("session response without token".to_string())),
        }
    }

    /// Creates an account and returns its session token. Sends no credential.
    ///
    /// # Errors
    ///
    /// Fails when the server rejects the registration or is unreachable.
    pub async fn register(&self, registration: &Registration) -> ApiResult<String> {
        tracing::debug!(email = %registration.email, "registering user");
        let (status, body) = self
            .send_with_status(self.http.post(self.url("/users")).json(registration))
            .await?;
        Self::session_token(status, &body)
    }

    /// Opens a session and returns its token. Sends no credential.
    ///
    /// # Errors
    ///
    /// Fails when the server rejects the credentials or is unreachable.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        tracing::debug!(email = %credentials.email, "opening session");
        let (status, body) = self
            .send_with_status(self.http.post(self.url("/sessions")).json(credentials))
            .await?;
        Self::session_token(status, &body)
    }

    /// Fetches one page of the collection sorted by title.
    ///
    /// `page` is 1-based. A missing or malformed envelope yields an empty page.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and non-success statuses.
    pub async fn list_movies(&self, page: u32, limit: u32) -> ApiResult<MoviePage> {
        let offset = u64::from(page.saturating_sub(1)) * u64::from(limit);
        tracing::debug!(page, limit, offset, "listing movies");

        let request = self.http.get(self.url("/movies")).query(&[
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("sort", "title".to_string()),
            ("order", "ASC".to_string()),
        ]);
        let body = self.send(self.authorized(request)).await?;
        Ok(wire::decode_page(&body))
    }

    /// Fetches a single movie.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] with `Movie not found` when the
    /// response carries no record.
    pub async fn get_movie(&self, id: &str) -> ApiResult<Movie> {
        let request = self.http.get(self.url(&format!("/movies/{id}")));
        let body = self.send(self.authorized(request)).await?;

        let record = wire::data_record(&body)
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;
        wire::transform_movie(record).map_err(|e| ApiError::Decode(format!("malformed movie record: {e}")))
    }

    /// Creates a movie from a validated form.
    ///
    /// The actors text is split on commas; names are trimmed and blanks
    /// dropped before sending.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] with `Failed to create movie` when the
    /// response carries no record.
    pub async fn add_movie(&self, form: &ValidatedMovieForm) -> ApiResult<Movie> {
        let form = form.form();
        let payload = CreateMovieRequest {
            title: &form.title,
            year: form.year,
            format: form.format,
            actors: form.actor_names(),
        };
        tracing::debug!(title = %payload.title, actors = payload.actors.len(), "creating movie");

        let request = self.http.post(self.url("/movies")).json(&payload);
        let body = self.send(self.authorized(request)).await?;

        let record = wire::data_record(&body)
            .ok_or_else(|| ApiError::Decode("Failed to create movie".to_string()))?;
        wire::transform_movie(record).map_err(|_| ApiError::Decode("Failed to create movie".to_string()))
    }

    /// Deletes a movie.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and non-success statuses.
    pub async fn delete_movie(&self, id: &str) -> ApiResult<()> {
        let request = self.http.delete(self.url(&format!("/movies/{id}")));
        self.send(self.authorized(request)).await?;
        Ok(())
    }

    /// Searches the collection on one field.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and non-success statuses.
    pub async fn search(&self, field: SearchField, text: &str) -> ApiResult<Vec<Movie>> {
        tracing::debug!(%field, query = %text, "searching movies");
        let request = self
            .http
            .get(self.url("/movies"))
            .query(&[(field.query_key(), text)]);
        let body = self.send(self.authorized(request)).await?;
        Ok(wire::decode_list(&body))
    }

    /// Searches movies whose title matches `title`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search`].
    pub async fn search_by_title(&self, title: &str) -> ApiResult<Vec<Movie>> {
        self.search(SearchField::Title, title).await
    }

    /// Searches movies featuring `actor`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search`].
    pub async fn search_by_actor(&self, actor: &str) -> ApiResult<Vec<Movie>> {
        self.search(SearchField::Actor, actor).await
    }

    /// Uploads an import file as the multipart part `movies`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and non-success statuses.
    pub async fn import_movies(&self, file: &ImportFile) -> ApiResult<Vec<Movie>> {
        tracing::debug!(file_name = %file.name(), records = file.record_count(), "uploading import file");

        let part = Part::text(file.contents().to_owned())
            .file_name(file.name().to_owned())
            .mime_str("text/plain")?;
        let form = Form::new().part("movies", part);

        let request = self.http.post(self.url("/movies/import")).multipart(form);
        let body = self.send(self.authorized(request)).await?;
        Ok(wire::decode_list(&body))
    }
}
