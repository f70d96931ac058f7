//! Reading sessions service

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateSession, ReadingSession, SessionDetails, UpdateSession},
    repository::Repository,
};

#[derive(Clone)]
pub struct SessionsService {
    repository: Repository,
    default_location: String,
}

impl SessionsService {
    pub fn new(repository: Repository, default_location: String) -> Self {
        Self {
            repository,
            default_location,
        }
    }

    /// List sessions, most recent first, each with its book expanded
    pub async fn list(&self) -> AppResult<Vec<SessionDetails>> {
        let sessions = self.repository.sessions.list().await?;

        let mut book_ids: Vec<Uuid> = sessions.iter().map(|s| s.book_id).collect();
        book_ids.sort_unstable();
        book_ids.dedup();

        let books: HashMap<Uuid, Book> = self
            .repository
            .books
            .get_many(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(sessions
            .into_iter()
            .map(|s| {
                let book = books.get(&s.book_id).cloned();
                SessionDetails::new(s, book)
            })
            .collect())
    }

    /// Get one session with its book expanded
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SessionDetails> {
        let session = self.get_bare(id).await?;
        let book = self.repository.books.get(session.book_id).await?;
        Ok(SessionDetails::new(session, book))
    }

    pub async fn create(&self, data: CreateSession) -> AppResult<ReadingSession> {
        let fields = data.into_fields(&self.default_location).validate()?;
        let session = self
            .repository
            .sessions
            .insert(Uuid::now_v7(), &fields)
            .await?;
        tracing::info!(session_id = %session.id, book_id = %session.book_id, "Reading session created");
        Ok(session)
    }

    /// Merge the supplied keys onto the stored session and write it back
    pub async fn update(&self, id: Uuid, data: UpdateSession) -> AppResult<ReadingSession> {
        let current = self.get_bare(id).await?;
        let fields = data
            .merge_into(&current, &self.default_location)
            .validate()?;

        let session = self
            .repository
            .sessions
            .update(id, &fields)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(session_id = %session.id, "Reading session updated");
        Ok(session)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.sessions.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(session_id = %id, "Reading session deleted");
        Ok(())
    }

    async fn get_bare(&self, id: Uuid) -> AppResult<ReadingSession> {
        self.repository
            .sessions
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Reading session {} not found", id))
}
