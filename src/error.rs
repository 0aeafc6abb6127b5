//! Error types for remote API calls

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Code reported when a login is rejected without a body
pub const NOT_FOUND_CODE: &str = "ENOTFOUND";

/// Failure of an authentication or logout request
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was received (connection, DNS, timeout)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status with a body
    #[error("server rejected request (HTTP {status}): {body}")]
    Http { status: StatusCode, body: Value },

    /// Login rejected with an empty or falsy body
    #[error("server rejected request (HTTP {status}) without a body")]
    EmptyBody { status: StatusCode },

    /// Logout rejected with an empty body
    #[error("server rejected request (HTTP {status})")]
    Rejected { status: StatusCode },
}

impl ApiError {
    /// Build the login rejection error for a non-success response body
    pub(crate) fn rejected(status: StatusCode, body: Option<Value>) -> Self {
        match body {
            Some(body) => Self::Http { status, body },
            None => Self::EmptyBody { status },
        }
    }

    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(e) => e.status(),
            Self::Http { status, .. } | Self::EmptyBody { status } | Self::Rejected { status } => {
                Some(*status)
            }
        }
    }

    /// Provider error code (`code` field of the body)
    ///
    /// Empty login rejections report [`NOT_FOUND_CODE`].
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Transport(_) | Self::Rejected { .. } => None,
            Self::Http { body, .. } => body.get("code").and_then(Value::as_str),
            Self::EmptyBody { .. } => Some(NOT_FOUND_CODE),
        }
    }

    /// Rejection body as seen by the caller
    ///
    /// Empty login rejections are normalized to `{"code": "ENOTFOUND"}`.
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Transport(_) | Self::Rejected { .. } => None,
            Self::Http { body, .. } => Some(body.clone()),
            Self::EmptyBody { .. } => Some(serde_json::json!({ "code": NOT_FOUND_CODE })),
        }
    }

    /// Whether no HTTP response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result alias for API calls
pub type Result<T> = std::result::Result<T, ApiError>;
