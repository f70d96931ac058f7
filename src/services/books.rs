//! Books service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ValidationError},
    models::{Book, BookFields, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        let fields = data.into_fields().validate()?;
        self.ensure_isbn_available(&fields, None).await?;

        let book = self.repository.books.insert(Uuid::now_v7(), &fields).await?;
        tracing::info!(book_id = %book.id, "Book created");
        Ok(book)
    }

    /// Merge the supplied keys onto the stored book and write it back
    pub async fn update(&self, id: Uuid, data: UpdateBook) -> AppResult<Book> {
        let current = self.get_by_id(id).await?;
        let fields = data.merge_into(&current).validate()?;
        self.ensure_isbn_available(&fields, Some(id)).await?;

        // The book may have been deleted between the read and the write
        let book = self
            .repository
            .books
            .update(id, &fields)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(book_id = %book.id, "Book updated");
        Ok(book)
    }

    /// Delete a book. Reading sessions that reference it are left in place.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// ISBN must be unique among books when set (exact string match)
    async fn ensure_isbn_available(&self, fields: &BookFields, own_id: Option<Uuid>) -> AppResult<()> {
        let Some(isbn) = fields.isbn.as_deref() else {
            return Ok(());
        };
        match self.repository.books.find_by_isbn(isbn).await? {
            Some(existing) if Some(existing.id) != own_id => Err(ValidationError::field(
                "Book",
                "isbn",
                format!("`{}` is already used by another book", isbn),
            )
            .into()),
            _ => Ok(()),
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}
