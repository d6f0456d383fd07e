/// Movie catalogue backend abstraction
///
/// Controllers only ever talk to the backend through this trait, which keeps
/// them testable against scripted or mocked backends and leaves the wire
/// details to the HTTP implementation.
use crate::{
    error::AppResult,
    models::{
        CollectionId, Movie, MovieDetails, MovieId, MoviePage, ProtectedMessage,
        RecommendationResponse, Shelf,
    },
};

pub mod http;

pub use http::HttpBackend;

/// Trait for movie catalogue backends
///
/// Every call is a single request/response exchange. Auth rejections must be
/// reported as `AppError::Unauthorized` so controllers can redirect instead of
/// rendering an inline error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieBackend: Send + Sync {
    /// Fetch one page of a paginated collection
    async fn fetch_page(&self, collection: &CollectionId, page: u32) -> AppResult<MoviePage>;

    /// Fetch an unpaged shelf of movies
    async fn fetch_shelf(&self, shelf: &Shelf) -> AppResult<Vec<Movie>>;

    /// Titles matching a free-text query; possibly empty
    async fn search(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Content-based and collaborative recommendations for a chat message
    async fn recommend(&self, text: &str) -> AppResult<RecommendationResponse>;

    /// Full details for one movie
    async fn fetch_details(&self, id: MovieId) -> AppResult<MovieDetails>;

    /// Auth-gated greeting for the signed-in user
    async fn fetch_protected(&self) -> AppResult<ProtectedMessage>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
