//! Error types for the API client

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when using the API client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with an error body; `message` is its text
    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },

    #[error("Unexpected response format ({status}): {body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    /// A form draft lacks required fields; nothing was sent
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ClientError {
    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } | ClientError::UnexpectedResponse { status, .. } => {
                Some(*status)
            }
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_validation(&self) -> bool {
        self.status() == Some(StatusCode::BAD_REQUEST)
    }
}

/// Result type alias for API client operations
pub type ClientResult<T> = Result<T, ClientError>;
