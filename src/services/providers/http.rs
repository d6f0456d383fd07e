/// HTTP movie catalogue backend
///
/// Talks JSON to the catalogue server. Every request carries the AJAX marker
/// header, the caller's token when one is available, and a fresh request ID
/// for log correlation.
///
/// Status handling:
/// - 403 → `AppError::Unauthorized`
/// - other non-2xx with `{"error"}` or `{"detail"}` → `AppError::Server`
/// - other non-2xx → `AppError::Unavailable`
use crate::{
    error::{AppError, AppResult},
    middleware::request_id::{attach_request_id, make_span_with_request_id},
    models::{
        CollectionId, ErrorBody, Movie, MovieDetails, MovieId, MoviePage, ProtectedMessage,
        RecommendationRequest, RecommendationResponse, Shelf,
    },
    services::{credentials::CredentialSource, providers::MovieBackend},
};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::Instrument;

const SEARCH_SEGMENTS: &[&str] = &["real-time-search"];
const RECOMMEND_SEGMENTS: &[&str] = &["api", "chatbot", "chatbot"];
const DASHBOARD_SEGMENTS: &[&str] = &["dashboard"];

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    api_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl HttpBackend {
    pub fn new(api_url: impl Into<String>, credentials: Arc<dyn CredentialSource>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            http_client: HttpClient::new(),
            api_url,
            credentials,
        }
    }

    /// Endpoint URL with a trailing slash; each segment is percent-encoded on its own
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            AppError::Internal(format!("Invalid backend URL '{}': {}", self.api_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Internal(format!("Backend URL '{}' cannot carry a path", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// Adds the common headers, sends, and decodes the JSON body
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        let mut builder = builder
            .header(ACCEPT, "application/json")
            .header("X-Requested-With", "XMLHttpRequest");
        if let Some(credentials) = self.credentials.current() {
            builder = builder.header(AUTHORIZATION, credentials.authorization_header());
        }
        let (builder, request_id) = attach_request_id(builder);
        let span = make_span_with_request_id(&method, path, &request_id);

        let response = builder.send().instrument(span.clone()).await?;
        Self::decode(response).instrument(span).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            tracing::warn!(status = %status, "Backend rejected credentials");
            return Err(AppError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::reason);

            tracing::error!(status = %status, body = %body, "Backend returned an error");

            return Err(match reason {
                Some(message) => AppError::Server {
                    status: status.as_u16(),
                    message,
                },
                None => AppError::Unavailable(format!("Backend returned status {}", status)),
            });
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw backend response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize backend response"
            );
            AppError::Unavailable(format!("Failed to parse backend response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MovieBackend for HttpBackend {
    async fn fetch_page(&self, collection: &CollectionId, page: u32) -> AppResult<MoviePage> {
        let url = self.endpoint(&collection.segments())?;
        let path = url.path().to_string();
        let builder = self.http_client.get(url).query(&[("page", page)]);

        let movie_page: MoviePage = self.send(Method::GET, &path, builder).await?;

        tracing::info!(
            collection = %collection,
            page = movie_page.page,
            total_pages = movie_page.total_pages,
            results = movie_page.items.len(),
            "Page fetched"
        );

        Ok(movie_page)
    }

    async fn fetch_shelf(&self, shelf: &Shelf) -> AppResult<Vec<Movie>> {
        let url = self.endpoint(&shelf.segments())?;
        let path = url.path().to_string();
        let builder = self.http_client.get(url);

        let movies: Vec<Movie> = self.send(Method::GET, &path, builder).await?;

        tracing::info!(shelf = %shelf.label(), results = movies.len(), "Shelf fetched");

        Ok(movies)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint(SEARCH_SEGMENTS)?;
        let path = url.path().to_string();
        let builder = self.http_client.get(url).query(&[("query", query)]);

        let movies: Vec<Movie> = self.send(Method::GET, &path, builder).await?;

        tracing::info!(query = %query, results = movies.len(), "Title search completed");

        Ok(movies)
    }

    async fn recommend(&self, text: &str) -> AppResult<RecommendationResponse> {
        let url = self.endpoint(RECOMMEND_SEGMENTS)?;
        let path = url.path().to_string();
        let builder = self
            .http_client
            .post(url)
            .json(&RecommendationRequest { movie_title: text });

        let response: RecommendationResponse = self.send(Method::POST, &path, builder).await?;

        tracing::info!(
            primary = response.primary.len(),
            secondary = response.secondary.len(),
            "Recommendations fetched"
        );

        Ok(response)
    }

    async fn fetch_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["movies_details", id_segment.as_str()])?;
        let path = url.path().to_string();
        let builder = self.http_client.get(url);

        let details: MovieDetails = self.send(Method::GET, &path, builder).await?;

        tracing::info!(movie_id = id, "Movie details fetched");

        Ok(details)
    }

    async fn fetch_protected(&self) -> AppResult<ProtectedMessage> {
        let url = self.endpoint(DASHBOARD_SEGMENTS)?;
        let path = url.path().to_string();
        let builder = self.http_client.get(url);
        self.send(Method::GET, &path, builder).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
