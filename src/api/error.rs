use thiserror::Error;

pub(crate) const REQUEST_FAILED: &str = "Request failed.";

/// Every failure the API layer can surface to a view.
///
/// `Display` is the status text the views render as-is.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum ApiError {
    /// No base URL configured; raised before any request is built.
    #[error("Missing API base URL. Set window.ENV.API_BASE_URL or API_BASE_URL at build time.")]
    Config,

    /// The request never produced a response (fetch rejected, CORS, offline).
    #[error("{0}")]
    Network(String),

    /// Non-2xx status. Carries the server `detail` or the generic fallback.
    #[error("{0}")]
    Server(String),

    /// 2xx response whose single entity failed shape validation.
    #[error("Unexpected note payload.")]
    UnexpectedPayload,

    #[error("Could not initialize CSRF cookie.")]
    Csrf,
}

impl ApiError {
    pub(crate) fn network(e: impl std::fmt::Display) -> Self {
        Self::Network(e.to_string())
    }

    /// Message taken from the decoded error body.
    pub(crate) fn from_body(data: &serde_json::Value) -> Self {
        let detail = data
            .get("detail")
            .and_then(|v| v.as_str())
            .unwrap_or(REQUEST_FAILED);
        Self::Server(detail.to_string())
    }

    /// Status text for a view, falling back when the error carries no text.
    pub(crate) fn status_or(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            fallback.to_string()
        } else {
            msg
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;
