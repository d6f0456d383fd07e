//! Async request guard
//!
//! Every controller owns one guard. Starting an operation mints a token and
//! makes it the only one whose response may touch visible state; tokens minted
//! earlier stop being current the moment a newer one exists. Responses that
//! arrive for a non-current token are dropped without being treated as errors.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Freshness marker for one logical operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct RequestGuard {
    minted: u64,
    current: Option<RequestToken>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a new token and supersedes whatever was in flight
    pub fn begin_operation(&mut self) -> RequestToken {
        self.minted += 1;
        let token = RequestToken(self.minted);
        if let Some(previous) = self.current.replace(token) {
            tracing::debug!(superseded = %previous, current = %token, "Operation superseded");
        }
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token)
    }

    /// Finishes `token`'s operation.
    ///
    /// Returns `true` when the token was still current, meaning the caller
    /// owns the right to commit its response. A `false` return means the
    /// response is stale and must be discarded.
    pub fn complete_operation(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Supersedes the in-flight operation without starting a new one
    pub fn invalidate(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::debug!(superseded = %previous, "Operation invalidated");
        }
    }

    /// Token of the operation still awaiting its response, if any
    pub fn in_flight(&self) -> Option<RequestToken> {
        self.current
    }
}

/// Bounds a backend call so a hung request surfaces as a failure
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(deadline)),
    }
}
