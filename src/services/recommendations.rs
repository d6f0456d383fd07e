//! Chat-style recommendation widget
//!
//! Each submission issues one request that yields two independent lists:
//! content-based titles (always shown) and collaborative-filtering titles
//! (shown only when the backend found any). The conversation is kept as an
//! append-only transcript; failed attempts stay visible.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error::AppResult,
    models::{RecommendationResponse, RecommendationSet, Role, Transcript},
    render::{Frame, RegionId, RenderSink, TranscriptLine},
    services::{
        guard::{with_deadline, RequestGuard},
        providers::MovieBackend,
        redirect_to_login, ControllerSettings,
    },
};

const PRIMARY_LABEL: &str = "Recommendations";
const SECONDARY_LABEL: &str = "Collaborative";
const CHAT_FAILURE: &str = "An unexpected error occurred.";

/// One labeled list in a combined display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub titles: Vec<String>,
}

impl Section {
    pub fn line(&self) -> String {
        format!("{}: {}", self.label, self.titles.join(", "))
    }
}

/// Merges the two recommendation sources into ordered display sections
pub struct ResultCombiner;

impl ResultCombiner {
    pub fn combine(source_query: &str, response: RecommendationResponse) -> RecommendationSet {
        RecommendationSet {
            primary: response.primary,
            secondary: response.secondary,
            source_query: source_query.to_string(),
        }
    }

    /// Primary first and always present; secondary only when non-empty
    pub fn sections(set: &RecommendationSet) -> Vec<Section> {
        let mut sections = vec![Section {
            label: PRIMARY_LABEL,
            titles: set.primary.clone(),
        }];
        if !set.secondary.is_empty() {
            sections.push(Section {
                label: SECONDARY_LABEL,
                titles: set.secondary.clone(),
            });
        }
        sections
    }

    /// Bot message body, one line per section
    pub fn message(set: &RecommendationSet) -> String {
        Self::sections(set)
            .iter()
            .map(Section::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct MergerState {
    guard: RequestGuard,
    transcript: Transcript,
}

pub struct RecommendationMerger {
    backend: Arc<dyn MovieBackend>,
    sink: Arc<dyn RenderSink>,
    region: RegionId,
    settings: ControllerSettings,
    state: Mutex<MergerState>,
}

impl RecommendationMerger {
    pub fn new(
        backend: Arc<dyn MovieBackend>,
        sink: Arc<dyn RenderSink>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            backend,
            sink,
            region: RegionId::new("chatbot-messages"),
            settings,
            state: Mutex::new(MergerState {
                guard: RequestGuard::new(),
                transcript: Transcript::new(),
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

    pub async fn transcript(&self) -> Transcript {
        self.state.lock().await.transcript.clone()
    }

    fn render_transcript(&self, transcript: &Transcript) {
        let lines = transcript
            .entries()
            .iter()
            .map(TranscriptLine::from)
            .collect();
        self.sink.render(&self.region, Frame::Transcript(lines));
    }

    /// Sends a chat message and records the reply.
    ///
    /// Returns `Ok(None)` when nothing was committed: blank input (no request,
    /// no transcript change) or a reply that arrived after a newer submission.
    /// Failures are appended to the transcript before being returned.
    pub async fn submit(&self, text: &str) -> AppResult<Option<RecommendationSet>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let token = {
            let mut state = self.state.lock().await;
            state.transcript.push(Role::User, text);
            self.render_transcript(&state.transcript);
            state.guard.begin_operation()
        };

        let result =
            with_deadline(self.settings.request_timeout, self.backend.recommend(text)).await;

        let mut state = self.state.lock().await;
        if !state.guard.complete_operation(token) {
            tracing::debug!(token = %token, "Discarding stale recommendation response");
            return Ok(None);
        }

        match result {
            Ok(response) => {
                let set = ResultCombiner::combine(text, response);
                tracing::info!(
                    primary = set.primary.len(),
                    secondary = set.secondary.len(),
                    "Recommendations rendered"
                );
                state.transcript.push(Role::Bot, ResultCombiner::message(&set));
                self.render_transcript(&state.transcript);
                Ok(Some(set))
            }
            Err(e) if e.is_auth_rejection() => {
                redirect_to_login(self.sink.as_ref(), &self.settings, "recommendations");
                Err(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "Recommendation request failed");
                state.transcript.push(Role::Error, e.user_message(CHAT_FAILURE));
                self.render_transcript(&state.transcript);
                Err(e)
            }
        }
    }
}
