//! Repository layer for database operations
//!
//! Each entity has a store trait so the services can run against PostgreSQL
//! in production and against mocks or in-memory stores in tests.

pub mod books;
pub mod database;
pub mod sessions;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookFields, ReadingSession, ValidSession},
};

pub use database::Database;

/// Persistence for books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books in insertion order
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Books among `ids` that exist; missing ids are skipped
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    async fn insert(&self, id: Uuid, fields: &BookFields) -> AppResult<Book>;

    /// Overwrite every writable column; `None` when no book has this id
    async fn update(&self, id: Uuid, fields: &BookFields) -> AppResult<Option<Book>>;

    /// `false` when no book has this id
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence for reading sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All sessions, most recent date first
    async fn list(&self) -> AppResult<Vec<ReadingSession>>;

    async fn get(&self, id: Uuid) -> AppResult<Option<ReadingSession>>;

    async fn insert(&self, id: Uuid, fields: &ValidSession) -> AppResult<ReadingSession>;

    async fn update(&self, id: Uuid, fields: &ValidSession) -> AppResult<Option<ReadingSession>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Reachability check for the backing database
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the entity stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub health: Arc<dyn HealthProbe>,
}

impl Repository {
    pub fn new(
        books: Arc<dyn BookStore>,
        sessions: Arc<dyn SessionStore>,
        health: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            books,
            sessions,
            health,
        }
    }

    /// Create a repository backed by the given PostgreSQL handle
    pub fn postgres(db: &Database) -> Self {
        Self {
            books: Arc::new(books::PgBookStore::new(db.pool().clone())),
            sessions: Arc::new(sessions::PgSessionStore::new(db.pool().clone())),
            health: Arc::new(db.clone()),
        }
    }
}
