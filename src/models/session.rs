//! Reading session model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{book::Book, patch};
use crate::error::ValidationError;

/// Reading session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
    pub id: Uuid,
    /// Referenced book; may point at a book that has since been deleted
    pub book_id: Uuid,
    pub date: DateTime<Utc>,
    pub location: String,
    pub participants: Vec<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reading session with its book expanded in place of the bare id.
///
/// `bookId` is `null` when the referenced book no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub id: Uuid,
    #[serde(rename = "bookId")]
    pub book: Option<Book>,
    pub date: DateTime<Utc>,
    pub location: String,
    pub participants: Vec<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionDetails {
    pub fn new(session: ReadingSession, book: Option<Book>) -> Self {
        Self {
            id: session.id,
            book,
            date: session.date,
            location: session.location,
            participants: session.participants,
            notes: session.notes,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// Writable columns of a reading session, as handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFields {
    pub book_id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
    pub location: String,
    pub participants: Vec<String>,
    pub notes: String,
}

/// Reading session fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSession {
    pub book_id: Uuid,
    pub date: DateTime<Utc>,
    pub location: String,
    pub participants: Vec<String>,
    pub notes: String,
}

impl SessionFields {
    /// Check required fields before a write. The book reference is not
    /// resolved: a session may name a book that does not exist.
    pub fn validate(self) -> Result<ValidSession, ValidationError> {
        match (self.book_id, self.date) {
            (Some(book_id), Some(date)) => Ok(ValidSession {
                book_id,
                date,
                location: self.location,
                participants: self.participants,
                notes: self.notes,
            }),
            (book_id, date) => {
                let mut errors = ValidationError::new("ReadingSession");
                if book_id.is_none() {
                    errors.add("bookId", "is required");
                }
                if date.is_none() {
                    errors.add("date", "is required");
                }
                Err(errors)
            }
        }
    }
}

/// Create reading session request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSession {
    pub book_id: Option<Uuid>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[schema(value_type = Option<String>)]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateSession {
    /// Fill in schema defaults; `default_location` comes from configuration
    pub fn into_fields(self, default_location: &str) -> SessionFields {
        SessionFields {
            book_id: self.book_id,
            date: self.date,
            location: self
                .location
                .unwrap_or_else(|| default_location.to_string()),
            participants: self.participants.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        }
    }
}

/// Update reading session request. Absent keys leave the stored value
/// untouched; `participants` replaces the whole list. `null` resets
/// `location`, `participants` and `notes` to their defaults and removes
/// `bookId`/`date`, which then fail validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSession {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<Uuid>)]
    pub book_id: Option<Option<Uuid>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_nullable_date"
    )]
    #[schema(value_type = Option<String>)]
    pub date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<Vec<String>>)]
    pub participants: Option<Option<Vec<String>>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl UpdateSession {
    /// Merge the supplied keys onto a stored session
    pub fn merge_into(self, session: &ReadingSession, default_location: &str) -> SessionFields {
        SessionFields {
            book_id: self.book_id.unwrap_or(Some(session.book_id)),
            date: self.date.unwrap_or(Some(session.date)),
            location: match self.location {
                None => session.location.clone(),
                Some(location) => location.unwrap_or_else(|| default_location.to_string()),
            },
            participants: patch(self.participants, || session.participants.clone()),
            notes: patch(self.notes, || session.notes.clone()),
        }
    }
}

/// Parse a session date given either as RFC 3339 or as a plain calendar
/// date, which is taken as midnight UTC.
pub fn parse_session_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_session_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{}`", s))),
    }
}

/// Like [`deserialize_optional_date`], for update keys where `null` differs
/// from absent; pair with `#[serde(default)]`
fn deserialize_nullable_date<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_date(deserializer).map(Some)
}
