use serde::Deserialize;
use std::time::Duration;

use crate::models::CollectionId;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the movie catalogue backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Token sent as `Authorization: Token <t>`
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Deadline for a single backend request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay before a search keystroke hits the network; 0 disables it
    #[serde(default)]
    pub search_debounce_ms: u64,

    /// Where auth rejections send the user
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Genre for the paged movie grid; unset pages the whole catalogue
    #[serde(default)]
    pub genre: Option<String>,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_login_path() -> String {
    "/login/".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?
            .validate()
    }

    /// Rejects settings no request could succeed under
    pub fn validate(self) -> anyhow::Result<Self> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Collection the paged grid is bound to
    pub fn collection(&self) -> CollectionId {
        match self.genre.as_deref().map(str::trim) {
            Some(genre) if !genre.is_empty() => CollectionId::Genre(genre.to_string()),
            _ => CollectionId::All,
        }
    }
}
