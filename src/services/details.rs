use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    models::MovieId,
    render::{DetailCard, Frame, Notice, RegionId, RenderSink},
    services::{
        guard::{with_deadline, RequestGuard},
        providers::MovieBackend,
        redirect_to_login, ControllerSettings, Outcome,
    },
};

const DETAILS_FAILURE: &str = "Failed to load movie details. Please try again later.";

/// Single-movie detail page
pub struct DetailView {
    backend: Arc<dyn MovieBackend>,
    sink: Arc<dyn RenderSink>,
    region: RegionId,
    settings: ControllerSettings,
    guard: Mutex<RequestGuard>,
}

impl DetailView {
    pub fn new(
        backend: Arc<dyn MovieBackend>,
        sink: Arc<dyn RenderSink>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            backend,
            sink,
            region: RegionId::new("movie-details"),
            settings,
            guard: Mutex::new(RequestGuard::new()),
        }
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    /// Shows `id`; a later `show` call wins over an earlier one still loading
    pub async fn show(&self, id: MovieId) -> Outcome {
        let token = self.guard.lock().await.begin_operation();

        let result =
            with_deadline(self.settings.request_timeout, self.backend.fetch_details(id)).await;

        let mut guard = self.guard.lock().await;
        if !guard.complete_operation(token) {
            tracing::debug!(movie_id = id, token = %token, "Discarding stale movie details");
            return Outcome::Discarded;
        }

        match result {
            Ok(details) => {
                self.sink.render(&self.region, Frame::Details(DetailCard::from(&details)));
                Outcome::Committed
            }
            Err(e) if e.is_auth_rejection() => {
                redirect_to_login(self.sink.as_ref(), &self.settings, "details");
                Outcome::Redirected
            }
            Err(e) => {
                tracing::error!(error = %e, movie_id = id, "Error fetching movie details");
                self.sink.render(
                    &self.region,
                    Frame::Notice(Notice::error(e.user_message(DETAILS_FAILURE))),
                );
                Outcome::Failed
            }
        }
    }
}
