//! Typed view models
//!
//! Each item type the controllers display has one mapping from its model into
//! a presentation-ready value. Sinks only ever see these, never raw models.

use crate::models::{Movie, MovieDetails, MovieId, Role, TranscriptEntry};

/// Poster used by grid and shelf cards when the backend has none
pub const DEFAULT_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";

/// Thumbnail used by search suggestions when the backend has none
pub const DEFAULT_THUMBNAIL: &str = "/static/default-poster.jpg";

pub const NOT_AVAILABLE: &str = "N/A";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn rating_text(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r > 0.0 => format!("{:.1}", r),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// A poster card in a grid or shelf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub rating: String,
    pub details_path: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: non_blank(movie.poster_url.as_deref())
                .unwrap_or(DEFAULT_POSTER)
                .to_string(),
            rating: rating_text(movie.average_rating),
            details_path: format!("/movies_details/{}/", movie.id),
        }
    }
}

/// One row of the live search dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub title: String,
    pub thumbnail_url: String,
}

impl From<&Movie> for SuggestionRow {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            thumbnail_url: non_blank(movie.poster_url.as_deref())
                .unwrap_or(DEFAULT_THUMBNAIL)
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    First,
    Previous,
    Next,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControl {
    pub kind: NavKind,
    pub target_page: u32,
}

/// Navigation strip under the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub current_page: u32,
    pub total_pages: u32,
    pub controls: Vec<NavControl>,
}

impl PaginationBar {
    /// Derives the visible controls purely from the page position.
    ///
    /// First/Previous exist iff `current_page > 1`, Next/Last iff
    /// `current_page < total_pages`.
    pub fn derive(current_page: u32, total_pages: u32) -> Self {
        let mut controls = Vec::with_capacity(4);
        if current_page > 1 {
            controls.push(NavControl {
                kind: NavKind::First,
                target_page: 1,
            });
            controls.push(NavControl {
                kind: NavKind::Previous,
                target_page: current_page - 1,
            });
        }
        if current_page < total_pages {
            controls.push(NavControl {
                kind: NavKind::Next,
                target_page: current_page + 1,
            });
            controls.push(NavControl {
                kind: NavKind::Last,
                target_page: total_pages,
            });
        }

        Self {
            current_page,
            total_pages,
            controls,
        }
    }

    pub fn has(&self, kind: NavKind) -> bool {
        self.controls.iter().any(|c| c.kind == kind)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Empty,
    Error,
}

/// A single message shown in place of a region's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn empty(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Empty,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub role: Role,
    pub text: String,
}

impl From<&TranscriptEntry> for TranscriptLine {
    fn from(entry: &TranscriptEntry) -> Self {
        let text = match entry.role {
            Role::Error => format!("Error: {}", entry.text),
            Role::User | Role::Bot => entry.text.clone(),
        };
        Self {
            role: entry.role,
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerView {
    Embed(String),
    Unavailable,
}

/// Full-page movie detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: String,
    pub poster_url: String,
    pub overview: String,
    pub genres: String,
    pub release_date: String,
    pub runtime: String,
    pub budget: String,
    pub rating: String,
    pub trailer: TrailerView,
}

impl From<&MovieDetails> for DetailCard {
    fn from(details: &MovieDetails) -> Self {
        let movie = &details.movie;
        let genres = movie
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            title: movie.title.clone(),
            poster_url: non_blank(movie.poster_url.as_deref())
                .unwrap_or(DEFAULT_POSTER)
                .to_string(),
            overview: non_blank(movie.overview.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            genres: if genres.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                genres
            },
            release_date: non_blank(movie.release_date.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            runtime: movie
                .runtime
                .filter(|r| *r > 0)
                .map(|r| format!("{} minutes", r))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            budget: movie
                .budget
                .filter(|b| *b > 0)
                .map(|b| format!("${}", b))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            rating: rating_text(movie.vote_average),
            trailer: match non_blank(details.trailer_url.as_deref()) {
                Some(url) => TrailerView::Embed(url.to_string()),
                None => TrailerView::Unavailable,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, MovieDetail};
    use chrono::Utc;

    fn movie(poster_url: Option<&str>, average_rating: Option<f64>) -> Movie {
        Movie {
            id: 42,
            title: "Inception".to_string(),
            poster_url: poster_url.map(str::to_string),
            average_rating,
        }
    }

    #[test]
    fn test_card_falls_back_to_placeholder_and_na() {
        let card = MovieCard::from(&movie(None, None));
        assert_eq!(card.poster_url, DEFAULT_POSTER);
        assert_eq!(card.rating, NOT_AVAILABLE);
        assert_eq!(card.details_path, "/movies_details/42/");
    }

    #[test]
    fn test_card_keeps_backend_values() {
        let card = MovieCard::from(&movie(Some("https://img/p.jpg"), Some(4.2)));
        assert_eq!(card.poster_url, "https://img/p.jpg");
        assert_eq!(card.rating, "4.2");
    }

    #[test]
    fn test_suggestion_uses_default_thumbnail() {
        let row = SuggestionRow::from(&movie(Some(""), None));
        assert_eq!(row.title, "Inception");
        assert_eq!(row.thumbnail_url, DEFAULT_THUMBNAIL);
    }

    #[test]
    fn test_pagination_middle_page_shows_everything() {
        let bar = PaginationBar::derive(3, 5);
        assert!(bar.has(NavKind::First));
        assert!(bar.has(NavKind::Previous));
        assert!(bar.has(NavKind::Next));
        assert!(bar.has(NavKind::Last));
        assert_eq!(bar.label(), "Page 3 of 5");
    }

    #[test]
    fn test_pagination_edges() {
        let first = PaginationBar::derive(1, 5);
        assert!(!first.has(NavKind::First));
        assert!(!first.has(NavKind::Previous));
        assert_eq!(
            first.controls,
            vec![
                NavControl { kind: NavKind::Next, target_page: 2 },
                NavControl { kind: NavKind::Last, target_page: 5 },
            ]
        );

        let last = PaginationBar::derive(5, 5);
        assert!(!last.has(NavKind::Next));
        assert!(!last.has(NavKind::Last));

        assert!(PaginationBar::derive(1, 1).controls.is_empty());
    }

    #[test]
    fn test_error_transcript_line_is_prefixed() {
        let entry = TranscriptEntry {
            role: Role::Error,
            text: "An unexpected error occurred.".to_string(),
            at: Utc::now(),
        };
        assert_eq!(
            TranscriptLine::from(&entry).text,
            "Error: An unexpected error occurred."
        );
    }

    #[test]
    fn test_detail_card_fallbacks() {
        let details = MovieDetails {
            movie: MovieDetail {
                title: "Obscure Film".to_string(),
                poster_url: None,
                overview: None,
                genres: vec![],
                release_date: None,
                runtime: None,
                budget: Some(0),
                vote_average: None,
            },
            trailer_url: None,
        };

        let card = DetailCard::from(&details);
        assert_eq!(card.overview, NOT_AVAILABLE);
        assert_eq!(card.genres, NOT_AVAILABLE);
        assert_eq!(card.runtime, NOT_AVAILABLE);
        assert_eq!(card.budget, NOT_AVAILABLE);
        assert_eq!(card.trailer, TrailerView::Unavailable);
    }

    #[test]
    fn test_detail_card_joins_genres() {
        let details = MovieDetails {
            movie: MovieDetail {
                title: "Inception".to_string(),
                poster_url: Some("https://img/p.jpg".to_string()),
                overview: Some("Dreams within dreams".to_string()),
                genres: vec![
                    Genre { name: "Action".to_string() },
                    Genre { name: "Science Fiction".to_string() },
                ],
                release_date: Some("2010-07-15".to_string()),
                runtime: Some(148),
                budget: Some(160000000),
                vote_average: Some(8.4),
            },
            trailer_url: Some("https://www.youtube.com/embed/YoHD9XEInc0".to_string()),
        };

        let card = DetailCard::from(&details);
        assert_eq!(card.genres, "Action, Science Fiction");
        assert_eq!(card.runtime, "148 minutes");
        assert_eq!(card.budget, "$160000000");
        assert_eq!(card.rating, "8.4");
        assert_eq!(
            card.trailer,
            TrailerView::Embed("https://www.youtube.com/embed/YoHD9XEInc0".to_string())
        );
    }
}
