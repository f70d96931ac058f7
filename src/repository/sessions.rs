//! Reading sessions repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::SessionStore;
use crate::{
    error::AppResult,
    models::{ReadingSession, ValidSession},
};

#[derive(Clone)]
pub struct PgSessionStore {
    pool: Pool<Postgres>,
}

impl PgSessionStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn list(&self) -> AppResult<Vec<ReadingSession>> {
        let rows = sqlx::query_as::<_, ReadingSession>(
            "SELECT * FROM reading_sessions ORDER BY date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<ReadingSession>> {
        let row = sqlx::query_as::<_, ReadingSession>("SELECT * FROM reading_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, id: Uuid, fields: &ValidSession) -> AppResult<ReadingSession> {
        let row = sqlx::query_as::<_, ReadingSession>(
            r#"
            INSERT INTO reading_sessions (id, book_id, date, location, participants, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.book_id)
        .bind(fields.date)
        .bind(&fields.location)
        .bind(&fields.participants)
        .bind(&fields.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, fields: &ValidSession) -> AppResult<Option<ReadingSession>> {
        let row = sqlx::query_as::<_, ReadingSession>(
            r#"
            UPDATE reading_sessions SET
                book_id = $2,
                date = $3,
                location = $4,
                participants = $5,
                notes = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.book_id)
        .bind(fields.date)
        .bind(&fields.location)
        .bind(&fields.participants)
        .bind(&fields.notes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reading_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
