//! Typed HTTP client for the book club API
//!
//! One method per endpoint, each returning the decoded body or the server's
//! error message. Requests are sent once: no retry, caching or deduplication.

pub mod error;
pub mod forms;

use reqwest::{Client as HttpClient, Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

pub use error::{ClientError, ClientResult};
pub use forms::{BookDraft, SessionDraft};

use crate::models::{
    Book, CreateBook, CreateSession, MessageResponse, ReadingSession, SessionDetails, UpdateBook,
    UpdateSession,
};

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "BOOKCLUB_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// REST client for the book club API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(HttpClient::new(), base_url)
    }

    pub fn with_http_client(http_client: HttpClient, mut base_url: Url) -> Self {
        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http_client,
            base_url,
        }
    }

    /// Create a client from a base URL string such as `http://localhost:5000/api`
    pub fn from_url(base_url: &str) -> ClientResult<Self> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    /// Create a client from `BOOKCLUB_API_URL`, falling back to the local default
    pub fn from_env() -> ClientResult<Self> {
        let url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::from_url(&url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Books

    pub async fn list_books(&self) -> ClientResult<Vec<Book>> {
        self.get("books").await
    }

    pub async fn get_book(&self, id: Uuid) -> ClientResult<Book> {
        self.get(&format!("books/{}", id)).await
    }

    pub async fn create_book(&self, book: &CreateBook) -> ClientResult<Book> {
        self.send(Method::POST, "books", Some(book)).await
    }

    pub async fn update_book(&self, id: Uuid, book: &UpdateBook) -> ClientResult<Book> {
        self.send(Method::PUT, &format!("books/{}", id), Some(book))
            .await
    }

    pub async fn delete_book(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.send(Method::DELETE, &format!("books/{}", id), None::<&()>)
            .await
    }

    // Reading sessions

    pub async fn list_sessions(&self) -> ClientResult<Vec<SessionDetails>> {
        self.get("sessions").await
    }

    pub async fn get_session(&self, id: Uuid) -> ClientResult<SessionDetails> {
        self.get(&format!("sessions/{}", id)).await
    }

    pub async fn create_session(&self, session: &CreateSession) -> ClientResult<ReadingSession> {
        self.send(Method::POST, "sessions", Some(session)).await
    }

    pub async fn update_session(
        &self,
        id: Uuid,
        session: &UpdateSession,
    ) -> ClientResult<ReadingSession> {
        self.send(Method::PUT, &format!("sessions/{}", id), Some(session))
            .await
    }

    pub async fn delete_session(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.send(Method::DELETE, &format!("sessions/{}", id), None::<&()>)
            .await
    }

    // Private helper methods

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::GET, path, None::<&()>).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let url = self.base_url.join(path)?;
        let mut request = self.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        handle_response(response).await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&text).map_err(ClientError::from);
    }

    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => Err(ClientError::Api {
            status,
            message: body.message,
        }),
        Err(_) => Err(ClientError::UnexpectedResponse { status, body: text }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_api_prefix() {
        let client = ApiClient::from_url("http://localhost:5000/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
        assert_eq!(
            client.base_url().join("books").unwrap().as_str(),
            "http://localhost:5000/api/books"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::from_url("not a url"),
            Err(ClientError::Url(_))
        ));
    }
}
