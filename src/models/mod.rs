//! Data models for the book club

pub mod book;
pub mod session;

// Re-export commonly used types
pub use book::{Book, BookFields, BookStatus, CreateBook, UpdateBook};
pub use session::{
    CreateSession, ReadingSession, SessionDetails, SessionFields, UpdateSession, ValidSession,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain message body returned by delete endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Apply one key of a partial update: absent keeps the stored value, `null`
/// resets to the type's default.
pub(crate) fn patch<T: Default>(value: Option<Option<T>>, current: impl FnOnce() -> T) -> T {
    match value {
        None => current(),
        Some(value) => value.unwrap_or_default(),
    }
}
