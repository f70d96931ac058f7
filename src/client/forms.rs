//! Form drafts for consumers that edit books and sessions.
//!
//! A draft holds the local, possibly incomplete state of an edit form. It only
//! checks that required fields are filled in; everything else is left to the
//! server. Submitting creates a new entity or updates the one being edited.

use chrono::NaiveDate;
use uuid::Uuid;

use super::{ApiClient, ClientError, ClientResult};
use crate::models::{
    Book, BookStatus, CreateBook, CreateSession, ReadingSession, SessionDetails, UpdateBook,
    UpdateSession,
};

/// Local state of a book form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub published_year: Option<i32>,
    pub status: BookStatus,
}

impl BookDraft {
    /// Prefill the form from an existing book
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone().unwrap_or_default(),
            description: book.description.clone(),
            published_year: book.published_year,
            status: book.status,
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.author.trim().is_empty() {
            missing.push("author");
        }
        missing
    }

    fn isbn(&self) -> Option<String> {
        let isbn = self.isbn.trim();
        (!isbn.is_empty()).then(|| isbn.to_string())
    }

    pub fn to_create(&self) -> CreateBook {
        CreateBook {
            title: Some(self.title.clone()),
            author: Some(self.author.clone()),
            isbn: self.isbn(),
            description: Some(self.description.clone()),
            published_year: self.published_year,
            status: Some(self.status),
        }
    }

    /// Every form field is sent; emptied optional fields are cleared
    pub fn to_update(&self) -> UpdateBook {
        UpdateBook {
            title: Some(Some(self.title.clone())),
            author: Some(Some(self.author.clone())),
            isbn: Some(self.isbn()),
            description: Some(Some(self.description.clone())),
            published_year: Some(self.published_year),
            status: Some(Some(self.status)),
        }
    }

    /// Create the book, or update `editing` when an existing book is being edited
    pub async fn submit(&self, client: &ApiClient, editing: Option<Uuid>) -> ClientResult<Book> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ClientError::MissingFields(missing));
        }
        match editing {
            Some(id) => client.update_book(id, &self.to_update()).await,
            None => client.create_book(&self.to_create()).await,
        }
    }
}

/// Local state of a reading session form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDraft {
    pub book_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub location: String,
    /// Comma-separated names, as typed
    pub participants: String,
    pub notes: String,
}

impl SessionDraft {
    /// Prefill the form from a session as returned by the list/get endpoints.
    /// A session whose book was deleted has no book selected.
    pub fn from_session(session: &SessionDetails) -> Self {
        Self {
            book_id: session.book.as_ref().map(|b| b.id),
            date: Some(session.date.date_naive()),
            location: session.location.clone(),
            participants: session.participants.join(", "),
            notes: session.notes.clone(),
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.book_id.is_none() {
            missing.push("bookId");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        missing
    }

    /// Split the comma-separated names, dropping blanks
    pub fn participant_list(&self) -> Vec<String> {
        self.participants
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn location(&self) -> Option<String> {
        let location = self.location.trim();
        (!location.is_empty()).then(|| location.to_string())
    }

    pub fn to_create(&self) -> CreateSession {
        CreateSession {
            book_id: self.book_id,
            date: self
                .date
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc()),
            location: self.location(),
            participants: Some(self.participant_list()),
            notes: Some(self.notes.clone()),
        }
    }

    /// Same keys as [`Self::to_create`]; an emptied location is left untouched
    pub fn to_update(&self) -> UpdateSession {
        let create = self.to_create();
        UpdateSession {
            book_id: create.book_id.map(Some),
            date: create.date.map(Some),
            location: create.location.map(Some),
            participants: create.participants.map(Some),
            notes: create.notes.map(Some),
        }
    }

    /// Create the session, or update `editing` when an existing session is being edited
    pub async fn submit(
        &self,
        client: &ApiClient,
        editing: Option<Uuid>,
    ) -> ClientResult<ReadingSession> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ClientError::MissingFields(missing));
        }
        match editing {
            Some(id) => client.update_session(id, &self.to_update()).await,
            None => client.create_session(&self.to_create()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_draft_requires_title_and_author() {
        let draft = BookDraft {
            title: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.missing_required(), vec!["title", "author"]);
    }

    #[test]
    fn test_empty_isbn_is_not_sent_on_create_and_cleared_on_update() {
        let draft = BookDraft {
            title: "Demian".to_string(),
            author: "Hesse".to_string(),
            ..Default::default()
        };

        let create = serde_json::to_value(draft.to_create()).unwrap();
        assert!(create.get("isbn").is_none());

        let update = serde_json::to_value(draft.to_update()).unwrap();
        assert_eq!(update["isbn"], json!(null));
        assert_eq!(update["publishedYear"], json!(null));
    }

    #[test]
    fn test_participants_are_split_and_trimmed() {
        let draft = SessionDraft {
            participants: "Anna,  Ben ,,Clara ".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.participant_list(), vec!["Anna", "Ben", "Clara"]);
    }

    #[test]
    fn test_session_draft_payload() {
        let book_id = Uuid::now_v7();
        let draft = SessionDraft {
            book_id: Some(book_id),
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        };
        assert!(draft.missing_required().is_empty());

        let payload = serde_json::to_value(draft.to_create()).unwrap();
        assert_eq!(payload["bookId"], json!(book_id));
        assert_eq!(payload["date"], json!("2024-05-01T00:00:00Z"));
        assert!(payload.get("location").is_none());
        assert_eq!(payload["participants"], json!([]));
    }

    #[tokio::test]
    async fn test_incomplete_draft_is_not_sent() {
        // Nothing listens here; a request would fail with an HTTP error instead
        let client = ApiClient::from_url("http://127.0.0.1:1/api").unwrap();
        let err = SessionDraft::default().submit(&client, None).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingFields(ref f) if f == &vec!["bookId", "date"]));
    }
}
