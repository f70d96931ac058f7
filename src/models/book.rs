//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::patch;
use crate::error::ValidationError;

/// Reading status of a book within the club
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "book_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Available,
    Reading,
    Completed,
}

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    /// Unique across all books when set
    pub isbn: Option<String>,
    pub description: String,
    pub published_year: Option<i32>,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable columns of a book, as handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: String,
    pub published_year: Option<i32>,
    pub status: BookStatus,
}

impl BookFields {
    /// Normalize and check the fields before a write.
    ///
    /// Title and author are trimmed and must be non-empty. A blank ISBN counts
    /// as no ISBN. ISBN uniqueness needs the store and is checked by the books
    /// service.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new("Book");

        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        if self.isbn.as_deref().is_some_and(|isbn| isbn.trim().is_empty()) {
            self.isbn = None;
        }

        if self.title.is_empty() {
            errors.add("title", "is required");
        }
        if self.author.is_empty() {
            errors.add("author", "is required");
        }

        errors.into_result(self)
    }
}

/// Create book request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
}

impl CreateBook {
    /// Fill in schema defaults. Missing required fields become empty and are
    /// rejected by [`BookFields::validate`].
    pub fn into_fields(self) -> BookFields {
        BookFields {
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            isbn: self.isbn,
            description: self.description.unwrap_or_default(),
            published_year: self.published_year,
            status: self.status.unwrap_or_default(),
        }
    }
}

/// Update book request. Absent keys leave the stored value untouched.
/// `null` clears `isbn` and `publishedYear`, resets `description` and
/// `status` to their defaults, and empties `title`/`author`, which then fail
/// validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub author: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub isbn: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<i32>)]
    pub published_year: Option<Option<i32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<BookStatus>)]
    pub status: Option<Option<BookStatus>>,
}

impl UpdateBook {
    /// Merge the supplied keys onto a stored book
    pub fn merge_into(self, book: &Book) -> BookFields {
        BookFields {
            title: patch(self.title, || book.title.clone()),
            author: patch(self.author, || book.author.clone()),
            isbn: self.isbn.unwrap_or_else(|| book.isbn.clone()),
            description: patch(self.description, || book.description.clone()),
            published_year: self.published_year.unwrap_or(book.published_year),
            status: patch(self.status, || book.status),
        }
    }
}
