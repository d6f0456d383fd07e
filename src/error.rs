use std::time::Duration;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Non-success response whose body carried an explicit reason
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Non-success response without a structured body
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered 403; callers redirect to the login entry point
    #[error("Not authorized")]
    Unauthorized,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this failure should send the user to the login entry point
    /// instead of being rendered inline.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }

    /// Text to show the user for this failure.
    ///
    /// Structured server errors are shown verbatim; everything else falls back
    /// to the caller's region-specific message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Server { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "An error occurred. Please try again later.";

    #[test]
    fn test_server_error_message_is_verbatim() {
        let err = AppError::Server {
            status: 400,
            message: "The 'movie_title' field is required.".to_string(),
        };
        assert_eq!(
            err.user_message(FALLBACK),
            "The 'movie_title' field is required."
        );
    }

    #[test]
    fn test_unstructured_errors_use_fallback() {
        let unavailable = AppError::Unavailable("status 502".to_string());
        let timeout = AppError::Timeout(Duration::from_secs(10));

        assert_eq!(unavailable.user_message(FALLBACK), FALLBACK);
        assert_eq!(timeout.user_message("Error loading results"), "Error loading results");
    }

    #[test]
    fn test_only_unauthorized_is_auth_rejection() {
        assert!(AppError::Unauthorized.is_auth_rejection());
        assert!(!AppError::Unavailable("status 500".to_string()).is_auth_rejection());
        assert!(!AppError::Server {
            status: 401,
            message: "You must be logged in to access this feature.".to_string()
        }
        .is_auth_rejection());
    }

    #[test]
    fn test_timeout_display() {
        let err = AppError::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "Request timed out after 3s");
    }
}
