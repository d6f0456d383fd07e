use std::sync::Arc;

use crate::{
    render::{Frame, Notice, RegionId, RenderSink},
    services::{
        guard::with_deadline, providers::MovieBackend, redirect_to_login, ControllerSettings,
        Outcome,
    },
};

/// Auth-gated greeting on the dashboard
///
/// A 403 sends the user to the login entry point. Other failures are only
/// logged; the greeting region keeps whatever it showed before.
pub struct WelcomePanel {
    backend: Arc<dyn MovieBackend>,
    sink: Arc<dyn RenderSink>,
    region: RegionId,
    settings: ControllerSettings,
}

impl WelcomePanel {
    pub fn new(
        backend: Arc<dyn MovieBackend>,
        sink: Arc<dyn RenderSink>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            backend,
            sink,
            region: RegionId::new("welcome-message"),
            settings,
        }
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub async fn load(&self) -> Outcome {
        match with_deadline(self.settings.request_timeout, self.backend.fetch_protected()).await {
            Ok(greeting) => {
                self.sink.render(&self.region, Frame::Notice(Notice::info(greeting.message)));
                Outcome::Committed
            }
            Err(e) if e.is_auth_rejection() => {
                redirect_to_login(self.sink.as_ref(), &self.settings, "welcome");
                Outcome::Redirected
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching dashboard data");
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError, models::ProtectedMessage, render::RecordingSink,
        services::providers::MockMovieBackend,
    };

    fn create_panel(backend: MockMovieBackend, sink: &RecordingSink) -> WelcomePanel {
        let settings = ControllerSettings {
            login_path: "/accounts/login/".to_string(),
            ..ControllerSettings::default()
        };
        WelcomePanel::new(Arc::new(backend), Arc::new(sink.clone()), settings)
    }

    #[tokio::test]
    async fn test_forbidden_navigates_to_login() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_fetch_protected()
            .returning(|| Err(AppError::Unauthorized));

        let sink = RecordingSink::new();
        let panel = create_panel(backend, &sink);

        assert_eq!(panel.load().await, Outcome::Redirected);
        assert_eq!(sink.redirects(), vec!["/accounts/login/".to_string()]);
        assert!(sink.frames().is_empty());
    }

    #[tokio::test]
    async fn test_greeting_rendered() {
        let mut backend = MockMovieBackend::new();
        backend.expect_fetch_protected().returning(|| {
            Ok(ProtectedMessage {
                message: "Welcome back, dana!".to_string(),
            })
        });

        let sink = RecordingSink::new();
        let panel = create_panel(backend, &sink);

        assert_eq!(panel.load().await, Outcome::Committed);
        assert_eq!(
            sink.current(panel.region()),
            Some(Frame::Notice(Notice::info("Welcome back, dana!")))
        );
    }

    #[tokio::test]
    async fn test_other_failures_only_logged() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_fetch_protected()
            .returning(|| Err(AppError::Unavailable("status 500".to_string())));

        let sink = RecordingSink::new();
        let panel = create_panel(backend, &sink);

        assert_eq!(panel.load().await, Outcome::Failed);
        assert!(sink.frames().is_empty());
        assert!(sink.redirects().is_empty());
    }
}
