//! Business logic services

pub mod books;
pub mod sessions;

use crate::{config::SessionsConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub sessions: sessions::SessionsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, sessions_config: SessionsConfig) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            sessions: sessions::SessionsService::new(
                repository.clone(),
                sessions_config.default_location,
            ),
            repository,
        }
    }

    /// Check that the backing database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.health.ping().await
    }
}
