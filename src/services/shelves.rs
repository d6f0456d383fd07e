use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    models::Shelf,
    render::{Frame, MovieCard, Notice, RegionId, RenderSink},
    services::{
        guard::{with_deadline, RequestGuard},
        providers::MovieBackend,
        redirect_to_login, ControllerSettings, Outcome,
    },
};

/// Most cards a shelf shows
pub const SHELF_LIMIT: usize = 12;

/// One unpaged row of movies (top rated, recent releases, a genre)
pub struct ShelfLoader {
    shelf: Shelf,
    backend: Arc<dyn MovieBackend>,
    sink: Arc<dyn RenderSink>,
    region: RegionId,
    settings: ControllerSettings,
    guard: Mutex<RequestGuard>,
}

impl ShelfLoader {
    pub fn new(
        shelf: Shelf,
        backend: Arc<dyn MovieBackend>,
        sink: Arc<dyn RenderSink>,
        settings: ControllerSettings,
    ) -> Self {
        let region = RegionId::new(match &shelf {
            Shelf::TopRated => "top_rated_movies".to_string(),
            Shelf::RecentReleases => "recent_release_movies".to_string(),
            Shelf::Genre(genre) => format!("{}_movies", genre),
        });

        Self {
            shelf,
            backend,
            sink,
            region,
            settings,
            guard: Mutex::new(RequestGuard::new()),
        }
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub async fn load(&self) -> Outcome {
        let token = self.guard.lock().await.begin_operation();

        let result = with_deadline(
            self.settings.request_timeout,
            self.backend.fetch_shelf(&self.shelf),
        )
        .await;

        let mut guard = self.guard.lock().await;
        if !guard.complete_operation(token) {
            tracing::debug!(shelf = %self.shelf.label(), token = %token, "Discarding stale shelf");
            return Outcome::Discarded;
        }

        match result {
            Ok(movies) if movies.is_empty() => {
                self.sink.render(
                    &self.region,
                    Frame::Notice(Notice::empty(format!(
                        "No {} movies found.",
                        self.shelf.label()
                    ))),
                );
                Outcome::Committed
            }
            Ok(movies) => {
                let cards = movies.iter().take(SHELF_LIMIT).map(MovieCard::from).collect();
                self.sink.render(&self.region, Frame::Cards(cards));
                Outcome::Committed
            }
            Err(e) if e.is_auth_rejection() => {
                redirect_to_login(self.sink.as_ref(), &self.settings, "shelf");
                Outcome::Redirected
            }
            Err(e) => {
                tracing::error!(error = %e, shelf = %self.shelf.label(), "Failed to load shelf");
                let fallback = format!(
                    "Failed to load {} movies. Please try again later.",
                    self.shelf.label()
                );
                self.sink.render(
                    &self.region,
                    Frame::Notice(Notice::error(e.user_message(&fallback))),
                );
                Outcome::Failed
            }
        }
    }
}
