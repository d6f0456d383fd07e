use reqwest::{Method, RequestBuilder};
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every outbound backend request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stamps a fresh request ID onto an outgoing request.
///
/// The same ID is returned so the caller can log it alongside the response.
pub fn attach_request_id(builder: RequestBuilder) -> (RequestBuilder, RequestId) {
    let request_id = RequestId::new();
    let builder = builder.header(REQUEST_ID_HEADER, request_id.as_str());
    (builder, request_id)
}

/// Helper function to create a tracing span for an outbound request
pub fn make_span_with_request_id(
    method: &Method,
    path: &str,
    request_id: &RequestId,
) -> tracing::Span {
    tracing::info_span!(
        "backend_request",
        method = %method,
        path = %path,
        request_id = %request_id,
    )
}
