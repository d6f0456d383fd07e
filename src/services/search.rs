//! Live search box controller
//!
//! Every query change starts a new operation; only the newest query's
//! response is ever shown. An empty query never reaches the network and hides
//! the dropdown, invalidating anything still in flight.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    models::Movie,
    render::{Frame, Notice, RegionId, RenderSink, SuggestionRow},
    services::{
        guard::{with_deadline, RequestGuard},
        providers::MovieBackend,
        redirect_to_login, ControllerSettings, Outcome,
    },
};

const NO_RESULTS: &str = "No results found";
const SEARCH_FAILURE: &str = "Error loading results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Populated,
    Empty,
    Error,
}

/// Snapshot of the search box
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub query: String,
    pub results: Vec<Movie>,
    pub status: SearchStatus,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            status: SearchStatus::Idle,
        }
    }
}

struct SearchState {
    guard: RequestGuard,
    session: SearchSession,
}

pub struct LiveSearch {
    backend: Arc<dyn MovieBackend>,
    sink: Arc<dyn RenderSink>,
    region: RegionId,
    settings: ControllerSettings,
    state: Mutex<SearchState>,
}

impl LiveSearch {
    pub fn new(
        backend: Arc<dyn MovieBackend>,
        sink: Arc<dyn RenderSink>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            backend,
            sink,
            region: RegionId::new("search-results"),
            settings,
            state: Mutex::new(SearchState {
                guard: RequestGuard::new(),
                session: SearchSession::default(),
            }),
        }
    }

    pub fn with_region(mut self, region: RegionId) -> Self {
        self.region = region;
        self
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub async fn session(&self) -> SearchSession {
        self.state.lock().await.session.clone()
    }

    /// Handles the search input changing to `raw`
    pub async fn on_query_change(&self, raw: &str) -> Outcome {
        let query = raw.trim().to_string();

        let token = {
            let mut state = self.state.lock().await;
            if query.is_empty() {
                state.guard.invalidate();
                state.session = SearchSession::default();
                self.sink.render(&self.region, Frame::Cleared);
                return Outcome::Skipped;
            }

            let token = state.guard.begin_operation();
            state.session.query = query.clone();
            state.session.status = SearchStatus::Loading;
            token
        };

        if !self.settings.search_debounce.is_zero() {
            tokio::time::sleep(self.settings.search_debounce).await;
            if !self.state.lock().await.guard.is_current(token) {
                tracing::debug!(
                    query = %query,
                    token = %token,
                    "Keystroke superseded during debounce"
                );
                return Outcome::Discarded;
            }
        }

        let result =
            with_deadline(self.settings.request_timeout, self.backend.search(&query)).await;

        let mut state = self.state.lock().await;
        if !state.guard.complete_operation(token) {
            tracing::debug!(query = %query, token = %token, "Discarding stale search response");
            return Outcome::Discarded;
        }

        match result {
            Ok(movies) if movies.is_empty() => {
                state.session.results.clear();
                state.session.status = SearchStatus::Empty;
                self.sink.render(&self.region, Frame::Notice(Notice::empty(NO_RESULTS)));
                Outcome::Committed
            }
            Ok(movies) => {
                let rows = movies.iter().map(SuggestionRow::from).collect();
                state.session.results = movies;
                state.session.status = SearchStatus::Populated;
                self.sink.render(&self.region, Frame::Suggestions(rows));
                Outcome::Committed
            }
            Err(e) if e.is_auth_rejection() => {
                state.session.results.clear();
                state.session.status = SearchStatus::Error;
                redirect_to_login(self.sink.as_ref(), &self.settings, "search");
                Outcome::Redirected
            }
            Err(e) => {
                tracing::error!(error = %e, query = %query, "Error fetching movies");
                state.session.results.clear();
                state.session.status = SearchStatus::Error;
                self.sink.render(
                    &self.region,
                    Frame::Notice(Notice::error(e.user_message(SEARCH_FAILURE))),
                );
                Outcome::Failed
            }
        }
    }

    /// Picks the `index`-th suggestion (zero-based).
    ///
    /// The title is copied into the query and the dropdown is hidden without
    /// issuing another search. Returns `None` when nothing is selectable.
    pub async fn select(&self, index: usize) -> Option<Movie> {
        let mut state = self.state.lock().await;
        if state.session.status != SearchStatus::Populated {
            return None;
        }
        let movie = state.session.results.get(index).cloned()?;

        state.guard.invalidate();
        state.session.query = movie.title.clone();
        state.session.results.clear();
        state.session.status = SearchStatus::Idle;
        self.sink.render(&self.region, Frame::Cleared);

        Some(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        render::{view::DEFAULT_THUMBNAIL, RecordingSink},
        services::providers::MockMovieBackend,
    };

    fn inception() -> Movie {
        Movie {
            id: 1,
            title: "Inception".to_string(),
            poster_url: None,
            average_rating: None,
        }
    }

    fn create_search(backend: MockMovieBackend, sink: &RecordingSink) -> LiveSearch {
        LiveSearch::new(
            Arc::new(backend),
            Arc::new(sink.clone()),
            ControllerSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_empty_query_never_hits_backend() {
        let mut backend = MockMovieBackend::new();
        backend.expect_search().never();

        let sink = RecordingSink::new();
        let search = create_search(backend, &sink);

        assert_eq!(search.on_query_change("   ").await, Outcome::Skipped);
        assert_eq!(sink.current(search.region()), Some(Frame::Cleared));
        assert_eq!(search.session().await, SearchSession::default());
    }

    #[tokio::test]
    async fn test_single_match_uses_default_thumbnail() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_search()
            .withf(|query| query == "Inception")
            .times(1)
            .returning(|_| Ok(vec![inception()]));

        let sink = RecordingSink::new();
        let search = create_search(backend, &sink);

        assert_eq!(search.on_query_change(" Inception ").await, Outcome::Committed);
        assert_eq!(
            sink.current(search.region()),
            Some(Frame::Suggestions(vec![SuggestionRow {
                title: "Inception".to_string(),
                thumbnail_url: DEFAULT_THUMBNAIL.to_string(),
            }]))
        );

        let session = search.session().await;
        assert_eq!(session.status, SearchStatus::Populated);
        assert_eq!(session.query, "Inception");
    }

    #[tokio::test]
    async fn test_no_matches_renders_placeholder() {
        let mut backend = MockMovieBackend::new();
        backend.expect_search().returning(|_| Ok(vec![]));

        let sink = RecordingSink::new();
        let search = create_search(backend, &sink);

        search.on_query_change("zzzz").await;
        assert_eq!(
            sink.current(search.region()),
            Some(Frame::Notice(Notice::empty(NO_RESULTS)))
        );
        assert_eq!(search.session().await.status, SearchStatus::Empty);
    }

    #[tokio::test]
    async fn test_failure_renders_error_placeholder_once() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_search()
            .times(1)
            .returning(|_| Err(AppError::Unavailable("connection refused".to_string())));

        let sink = RecordingSink::new();
        let search = create_search(backend, &sink);

        assert_eq!(search.on_query_change("heat").await, Outcome::Failed);
        assert_eq!(sink.frames_for(search.region()).len(), 1);
        assert_eq!(
            sink.current(search.region()),
            Some(Frame::Notice(Notice::error(SEARCH_FAILURE)))
        );
        assert_eq!(search.session().await.status, SearchStatus::Error);
    }

    #[tokio::test]
    async fn test_select_copies_title_and_hides_results() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![inception()]));

        let sink = RecordingSink::new();
        let search = create_search(backend, &sink);
        search.on_query_change("Incep").await;

        let picked = search.select(0).await;
        assert_eq!(picked.map(|m| m.title), Some("Inception".to_string()));
        assert_eq!(sink.current(search.region()), Some(Frame::Cleared));

        let session = search.session().await;
        assert_eq!(session.query, "Inception");
        assert_eq!(session.status, SearchStatus::Idle);
        assert!(session.results.is_empty());
    }

    #[tokio::test]
    async fn test_select_out_of_range_is_none() {
        let mut backend = MockMovieBackend::new();
        backend.expect_search().returning(|_| Ok(vec![inception()]));

        let sink = RecordingSink::new();
        let search = create_search(backend, &sink);

        assert_eq!(search.select(0).await, None);
        search.on_query_change("Incep").await;
        assert_eq!(search.select(3).await, None);
        assert_eq!(search.session().await.status, SearchStatus::Populated);
    }

    #[tokio::test]
    async fn test_forbidden_redirects() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_search()
            .returning(|_| Err(AppError::Unauthorized));

        let sink = RecordingSink::new();
        let search = create_search(backend, &sink);

        assert_eq!(search.on_query_change("heat").await, Outcome::Redirected);
        assert!(sink.frames().is_empty());
        assert_eq!(sink.redirects(), vec!["/login/".to_string()]);
    }
}
