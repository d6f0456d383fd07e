use std::time::Duration;

use crate::config::Config;
use crate::render::RenderSink;

pub mod credentials;
pub mod details;
pub mod guard;
pub mod pager;
pub mod providers;
pub mod recommendations;
pub mod search;
pub mod shelves;
pub mod welcome;

pub use credentials::{CredentialSource, Credentials, SharedCredentials};
pub use details::DetailView;
pub use guard::{RequestGuard, RequestToken};
pub use pager::{PageState, Pager, PagerPhase};
pub use providers::{HttpBackend, MovieBackend};
pub use recommendations::{RecommendationMerger, ResultCombiner};
pub use search::{LiveSearch, SearchSession, SearchStatus};
pub use shelves::ShelfLoader;
pub use welcome::WelcomePanel;

/// Settings shared by every controller
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    pub login_path: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            search_debounce: Duration::ZERO,
            login_path: "/login/".to_string(),
        }
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            search_debounce: config.search_debounce(),
            login_path: config.login_path.clone(),
        }
    }
}

/// What a single controller operation ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected before any request was issued
    Skipped,
    /// Response accepted and rendered
    Committed,
    /// Response arrived for a superseded operation and was dropped
    Discarded,
    /// Failure rendered inline
    Failed,
    /// Auth rejection; the sink was sent to the login entry point
    Redirected,
}

pub(crate) fn redirect_to_login(
    sink: &dyn RenderSink,
    settings: &ControllerSettings,
    controller: &'static str,
) {
    tracing::warn!(
        controller,
        location = %settings.login_path,
        "User not authenticated, redirecting to login"
    );
    sink.redirect(&settings.login_path);
}
