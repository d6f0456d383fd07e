//! Paged movie grid controller
//!
//! Tracks the current page of one collection and swaps the grid's content on
//! every accepted page response. Requests for pages outside `1..=total_pages`
//! are ignored once the total is known; before the first successful response
//! only the lower bound applies.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    models::CollectionId,
    render::{Frame, MovieCard, Notice, PaginationBar, RegionId, RenderSink},
    services::{
        guard::{with_deadline, RequestGuard, RequestToken},
        providers::MovieBackend,
        redirect_to_login, ControllerSettings, Outcome,
    },
};

const GRID_FAILURE: &str = "Failed to load movies. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    Idle,
    Loading { page: u32, token: RequestToken },
    Loaded { page: u32, total_pages: u32 },
    Failed { page: u32 },
}

/// Committed position within the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub collection: CollectionId,
    pub current_page: u32,
    /// Unknown until the first successful response
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct PagerRegions {
    pub grid: RegionId,
    pub pagination: RegionId,
}

impl Default for PagerRegions {
    fn default() -> Self {
        Self {
            grid: RegionId::new("movie-grid"),
            pagination: RegionId::new("pagination"),
        }
    }
}

struct PagerState {
    guard: RequestGuard,
    phase: PagerPhase,
    current_page: u32,
    total_pages: Option<u32>,
}

pub struct Pager {
    collection: CollectionId,
    backend: Arc<dyn MovieBackend>,
    sink: Arc<dyn RenderSink>,
    regions: PagerRegions,
    settings: ControllerSettings,
    state: Mutex<PagerState>,
}

impl Pager {
    pub fn new(
        collection: CollectionId,
        backend: Arc<dyn MovieBackend>,
        sink: Arc<dyn RenderSink>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            collection,
            backend,
            sink,
            regions: PagerRegions::default(),
            settings,
            state: Mutex::new(PagerState {
                guard: RequestGuard::new(),
                phase: PagerPhase::Idle,
                current_page: 1,
                total_pages: None,
            }),
        }
    }

    pub fn with_regions(mut self, regions: PagerRegions) -> Self {
        self.regions = regions;
        self
    }

    pub fn regions(&self) -> &PagerRegions {
        &self.regions
    }

    pub async fn phase(&self) -> PagerPhase {
        self.state.lock().await.phase
    }

    pub async fn page_state(&self) -> PageState {
        let state = self.state.lock().await;
        PageState {
            collection: self.collection.clone(),
            current_page: state.current_page,
            total_pages: state.total_pages,
        }
    }

    /// Loads `page` and replaces the grid with its items
    pub async fn request_page(&self, page: u32) -> Outcome {
        let token = {
            let mut state = self.state.lock().await;
            let out_of_range = page < 1 || state.total_pages.is_some_and(|total| page > total);
            if out_of_range {
                tracing::debug!(
                    collection = %self.collection,
                    page,
                    total_pages = ?state.total_pages,
                    "Page out of range, ignoring"
                );
                return Outcome::Skipped;
            }

            let token = state.guard.begin_operation();
            state.phase = PagerPhase::Loading { page, token };
            token
        };

        tracing::debug!(collection = %self.collection, page, token = %token, "Loading page");

        let result = with_deadline(
            self.settings.request_timeout,
            self.backend.fetch_page(&self.collection, page),
        )
        .await;

        let mut state = self.state.lock().await;
        if !state.guard.complete_operation(token) {
            tracing::debug!(page, token = %token, "Discarding stale page response");
            return Outcome::Discarded;
        }

        match result {
            Ok(response) => {
                let total_pages = response.total_pages.max(1);
                let current_page = response.page.clamp(1, total_pages);
                if current_page != page {
                    tracing::warn!(
                        requested = page,
                        served = response.page,
                        "Backend served a different page than requested"
                    );
                }

                state.current_page = current_page;
                state.total_pages = Some(total_pages);
                state.phase = PagerPhase::Loaded {
                    page: current_page,
                    total_pages,
                };

                let cards: Vec<MovieCard> = response.items.iter().map(MovieCard::from).collect();
                tracing::info!(
                    collection = %self.collection,
                    page = current_page,
                    total_pages,
                    results = cards.len(),
                    "Page rendered"
                );

                self.sink.render(&self.regions.grid, Frame::Cards(cards));
                self.sink.render(
                    &self.regions.pagination,
                    Frame::Pagination(PaginationBar::derive(current_page, total_pages)),
                );
                Outcome::Committed
            }
            Err(e) if e.is_auth_rejection() => {
                state.phase = PagerPhase::Failed { page };
                redirect_to_login(self.sink.as_ref(), &self.settings, "pager");
                Outcome::Redirected
            }
            Err(e) => {
                tracing::error!(error = %e, page, "Failed to load page");
                state.phase = PagerPhase::Failed { page };
                self.sink.render(
                    &self.regions.grid,
                    Frame::Notice(Notice::error(e.user_message(GRID_FAILURE))),
                );
                Outcome::Failed
            }
        }
    }

    pub async fn first_page(&self) -> Outcome {
        self.request_page(1).await
    }

    pub async fn previous_page(&self) -> Outcome {
        let target = self.state.lock().await.current_page.saturating_sub(1);
        self.request_page(target).await
    }

    pub async fn next_page(&self) -> Outcome {
        let target = self.state.lock().await.current_page.saturating_add(1);
        self.request_page(target).await
    }

    /// No-op until the total page count is known
    pub async fn last_page(&self) -> Outcome {
        let total_pages = self.state.lock().await.total_pages;
        match total_pages {
            Some(total) => self.request_page(total).await,
            None => Outcome::Skipped,
        }
    }

    /// Re-fetches the committed page
    pub async fn reload(&self) -> Outcome {
        let target = self.state.lock().await.current_page;
        self.request_page(target).await
    }
}
