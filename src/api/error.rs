use thiserror::Error;

use crate::session::{Role, SessionError};

/// Failure of a backend call, classified once at the gateway.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 on a bearer request; the caller's session is stale.
    #[error("Session expired. Please login again.")]
    Unauthorized,
    /// Non-2xx response; `message` comes from the body when present.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 2xx response whose envelope says `success: false`.
    #[error("{message}")]
    Rejected { message: String },
    #[error("No response from server. Please check your connection.")]
    NoResponse(#[source] reqwest::Error),
    #[error("Error setting up the request: {0}")]
    Setup(String),
    /// No session for the role; nothing was sent.
    #[error("Please login as {0}")]
    MissingSession(Role),
    #[error("Unexpected response from server: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to store session: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Text for the notifier.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True when the caller has to re-authenticate.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::MissingSession(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Setup(err.to_string())
        } else {
            ApiError::NoResponse(err)
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Pick the human-readable message out of an error body.
///
/// Priority: JSON `message`, JSON `error`, raw non-JSON text, `fallback`.
pub fn extract_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) => trimmed.to_string(),
    }
}
