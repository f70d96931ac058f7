//! Shared helpers for integration tests: an in-memory store and request helpers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bookclub_server::{
    api,
    config::SessionsConfig,
    error::{AppResult, ValidationError},
    models::{Book, BookFields, ReadingSession, ValidSession},
    repository::{BookStore, HealthProbe, Repository, SessionStore},
    services::Services,
    AppError, AppState,
};

/// Store keeping everything in vectors, in insertion order
#[derive(Default)]
pub struct MemoryStore {
    books: Mutex<Vec<Book>>,
    sessions: Mutex<Vec<ReadingSession>>,
    offline: bool,
}

impl MemoryStore {
    /// A store whose every call fails like an unreachable database
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn check_isbn(books: &[Book], id: Uuid, fields: &BookFields) -> AppResult<()> {
        if let Some(isbn) = &fields.isbn {
            if books
                .iter()
                .any(|b| b.id != id && b.isbn.as_ref() == Some(isbn))
            {
                return Err(ValidationError::field("Book", "isbn", "duplicate key").into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        self.check_online()?;
        Ok(self.books.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.check_online()?;
        Ok(self.books.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        self.check_online()?;
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        self.check_online()?;
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.isbn.as_deref() == Some(isbn))
            .cloned())
    }

    async fn insert(&self, id: Uuid, fields: &BookFields) -> AppResult<Book> {
        self.check_online()?;
        let mut books = self.books.lock().unwrap();
        Self::check_isbn(&books, id, fields)?;

        let now = Utc::now();
        let book = Book {
            id,
            title: fields.title.clone(),
            author: fields.author.clone(),
            isbn: fields.isbn.clone(),
            description: fields.description.clone(),
            published_year: fields.published_year,
            status: fields.status,
            created_at: now,
            updated_at: now,
        };
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: Uuid, fields: &BookFields) -> AppResult<Option<Book>> {
        self.check_online()?;
        let mut books = self.books.lock().unwrap();
        Self::check_isbn(&books, id, fields)?;

        let Some(book) = books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        book.title = fields.title.clone();
        book.author = fields.author.clone();
        book.isbn = fields.isbn.clone();
        book.description = fields.description.clone();
        book.published_year = fields.published_year;
        book.status = fields.status;
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.check_online()?;
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<ReadingSession>> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap().clone();
        sessions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(sessions)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<ReadingSession>> {
        self.check_online()?;
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn insert(&self, id: Uuid, fields: &ValidSession) -> AppResult<ReadingSession> {
        self.check_online()?;
        let now = Utc::now();
        let session = ReadingSession {
            id,
            book_id: fields.book_id,
            date: fields.date,
            location: fields.location.clone(),
            participants: fields.participants.clone(),
            notes: fields.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn update(&self, id: Uuid, fields: &ValidSession) -> AppResult<Option<ReadingSession>> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        let Some(session) = sessions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        session.book_id = fields.book_id;
        session.date = fields.date;
        session.location = fields.location.clone();
        session.participants = fields.participants.clone();
        session.notes = fields.notes.clone();
        session.updated_at = Utc::now();
        Ok(Some(session.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        Ok(sessions.len() < before)
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.check_online()
    }
}

/// Router over the given store with default configuration
pub fn app_with(store: Arc<MemoryStore>) -> Router {
    let repository = Repository::new(store.clone(), store.clone(), store);
    let services = Services::new(repository, SessionsConfig::default());
    api::router(AppState::new(services))
}

/// Router over a fresh, empty in-memory store
pub fn app() -> Router {
    app_with(Arc::new(MemoryStore::default()))
}

/// Send one request through the router and decode the JSON response
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}
