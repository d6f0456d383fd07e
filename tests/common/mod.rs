#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reelfeed::{
    error::{AppError, AppResult},
    models::{
        CollectionId, Movie, MovieDetails, MovieId, MoviePage, ProtectedMessage,
        RecommendationResponse, Shelf,
    },
    services::MovieBackend,
};

/// Backend whose responses arrive after a per-request delay
///
/// Meant for `start_paused` tokio tests, where the delays decide arrival order
/// deterministically.
#[derive(Default)]
pub struct ScriptedBackend {
    pub total_pages: u32,
    pub page_delays: HashMap<u32, Duration>,
    pub search_delays: HashMap<String, Duration>,
    pub recommend_delays: HashMap<String, Duration>,
    pub default_delay: Duration,
    pub failing_pages: HashSet<u32>,
    pub failing_queries: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Self::default()
        }
    }

    pub fn page_delay(mut self, page: u32, millis: u64) -> Self {
        self.page_delays.insert(page, Duration::from_millis(millis));
        self
    }

    pub fn search_delay(mut self, query: &str, millis: u64) -> Self {
        self.search_delays
            .insert(query.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn recommend_delay(mut self, text: &str, millis: u64) -> Self {
        self.recommend_delays
            .insert(text.to_string(), Duration::from_millis(millis));
        self
    }

    /// `page` answers with a structured server error after its delay
    pub fn fail_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    pub fn fail_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn default_delay(mut self, millis: u64) -> Self {
        self.default_delay = Duration::from_millis(millis);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait(&self, delay: Option<&Duration>) {
        tokio::time::sleep(*delay.unwrap_or(&self.default_delay)).await;
    }
}

/// Message a scripted failure would show if it were ever rendered
pub const SCRIPTED_FAILURE: &str = "Scripted backend failure";

fn scripted_failure() -> AppError {
    AppError::Server {
        status: 500,
        message: SCRIPTED_FAILURE.to_string(),
    }
}

pub fn movies_for_page(page: u32, count: u64) -> Vec<Movie> {
    (0..count)
        .map(|i| Movie {
            id: page as u64 * 100 + i,
            title: format!("Page {} movie {}", page, i),
            poster_url: None,
            average_rating: None,
        })
        .collect()
}

#[async_trait::async_trait]
impl MovieBackend for ScriptedBackend {
    async fn fetch_page(&self, _collection: &CollectionId, page: u32) -> AppResult<MoviePage> {
        self.record(format!("page:{}", page));
        self.wait(self.page_delays.get(&page)).await;
        if self.failing_pages.contains(&page) {
            return Err(scripted_failure());
        }
        Ok(MoviePage {
            items: movies_for_page(page, 12),
            page,
            total_pages: self.total_pages,
        })
    }

    async fn fetch_shelf(&self, _shelf: &Shelf) -> AppResult<Vec<Movie>> {
        Err(AppError::Internal("shelves are not scripted".to_string()))
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        self.record(format!("search:{}", query));
        self.wait(self.search_delays.get(query)).await;
        if self.failing_queries.contains(query) {
            return Err(scripted_failure());
        }
        Ok(vec![Movie {
            id: query.len() as u64,
            title: format!("{} match", query),
            poster_url: None,
            average_rating: None,
        }])
    }

    async fn recommend(&self, text: &str) -> AppResult<RecommendationResponse> {
        self.record(format!("recommend:{}", text));
        self.wait(self.recommend_delays.get(text)).await;
        Ok(RecommendationResponse {
            primary: vec![format!("{} pick", text)],
            secondary: vec![],
        })
    }

    async fn fetch_details(&self, _id: MovieId) -> AppResult<MovieDetails> {
        Err(AppError::Internal("details are not scripted".to_string()))
    }

    async fn fetch_protected(&self) -> AppResult<ProtectedMessage> {
        Err(AppError::Unauthorized)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn backend(scripted: ScriptedBackend) -> (Arc<ScriptedBackend>, Arc<dyn MovieBackend>) {
    let scripted = Arc::new(scripted);
    let dynamic: Arc<dyn MovieBackend> = scripted.clone();
    (scripted, dynamic)
}
