use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod transcript;

pub use transcript::{Role, Transcript, TranscriptEntry};

/// Catalogue identifier of a movie
pub type MovieId = u64;

/// A movie as listed in grids, shelves and search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Grid endpoints send `movie_id`, search sends `id`
    #[serde(alias = "movie_id")]
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

/// Paginated collection the grid is bound to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionId {
    /// The whole catalogue
    All,
    /// Movies tagged with a single genre
    Genre(String),
}

impl CollectionId {
    /// Path segments of the endpoint serving pages of this collection
    ///
    /// The genre is one segment however it is spelled; encoding it is up to
    /// the URL builder.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            CollectionId::All => vec!["movies_list"],
            CollectionId::Genre(genre) => vec!["genre_movies_full_page", genre.as_str()],
        }
    }
}

impl Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionId::All => write!(f, "all"),
            CollectionId::Genre(genre) => write!(f, "genre:{}", genre),
        }
    }
}

/// One page of a collection as returned by the backend
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MoviePage {
    #[serde(alias = "movies")]
    pub items: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
}

/// Unpaged movie rows shown on the landing page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shelf {
    TopRated,
    RecentReleases,
    Genre(String),
}

impl Shelf {
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Shelf::TopRated => vec!["top_rated_movies"],
            Shelf::RecentReleases => vec!["recent_release_movies"],
            Shelf::Genre(genre) => vec!["movies_by_genre", genre.as_str()],
        }
    }

    /// Human label used in placeholders ("No top-rated movies found.")
    pub fn label(&self) -> String {
        match self {
            Shelf::TopRated => "top-rated".to_string(),
            Shelf::RecentReleases => "recently released".to_string(),
            Shelf::Genre(genre) => genre.clone(),
        }
    }
}

/// Raw chatbot response carrying both recommendation sources
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct RecommendationResponse {
    /// Content-based titles
    #[serde(default, rename = "content_recommendations")]
    pub primary: Vec<String>,
    /// Collaborative-filtering titles; routinely empty
    #[serde(default, rename = "collaborative_recommendations")]
    pub secondary: Vec<String>,
}

/// Body sent when asking for recommendations
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest<'a> {
    pub movie_title: &'a str,
}

/// Combined recommendations ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSet {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub source_query: String,
}

/// Error body the backend attaches to non-success responses
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// The reason to show the user, if the backend gave one
    pub fn reason(self) -> Option<String> {
        self.error
            .or(self.detail)
            .map(|reason| reason.trim().to_string())
            .filter(|reason| !reason.is_empty())
    }
}

/// Payload of the auth-gated dashboard endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProtectedMessage {
    pub message: String,
}

/// Response of the movie details endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub movie: MovieDetail,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Genre {
    pub name: String,
}
