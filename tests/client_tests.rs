//! API client tests against a server bound to a loopback port

mod common;

use chrono::NaiveDate;
use uuid::Uuid;

use bookclub_server::{
    client::{ApiClient, BookDraft, ClientError, SessionDraft},
    models::{BookStatus, CreateBook, CreateSession, UpdateBook},
};

async fn spawn_server() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, common::app()).await.unwrap();
    });
    ApiClient::from_url(&format!("http://{}/api", addr)).unwrap()
}

fn create_request(title: &str, isbn: Option<&str>) -> CreateBook {
    CreateBook {
        title: Some(title.to_string()),
        author: Some("Hesse".to_string()),
        isbn: isbn.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_book_crud_round_trip() {
    let client = spawn_server().await;

    let created = client
        .create_book(&create_request("Siddhartha", Some("978-3")))
        .await
        .unwrap();
    assert_eq!(created.status, BookStatus::Available);

    let fetched = client.get_book(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let update = UpdateBook {
        status: Some(Some(BookStatus::Completed)),
        ..Default::default()
    };
    let updated = client.update_book(created.id, &update).await.unwrap();
    assert_eq!(updated.status, BookStatus::Completed);
    assert_eq!(updated.title, "Siddhartha");

    let books = client.list_books().await.unwrap();
    assert_eq!(books.len(), 1);

    let message = client.delete_book(created.id).await.unwrap();
    assert_eq!(message.message, "Book deleted successfully");

    let err = client.get_book(created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_message_is_propagated() {
    let client = spawn_server().await;

    client
        .create_book(&create_request("Demian", Some("dup")))
        .await
        .unwrap();
    let err = client
        .create_book(&create_request("Steppenwolf", Some("dup")))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    match err {
        ClientError::Api { message, .. } => assert!(message.contains("isbn")),
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sessions_expand_their_book() {
    let client = spawn_server().await;

    let book = client
        .create_book(&create_request("Siddhartha", None))
        .await
        .unwrap();
    let session = client
        .create_session(&CreateSession {
            book_id: Some(book.id),
            date: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(session.location, "Osnabrück");
    assert!(session.participants.is_empty());

    let sessions = client.list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].book.as_ref(), Some(&book));

    client.delete_book(book.id).await.unwrap();
    let details = client.get_session(session.id).await.unwrap();
    assert!(details.book.is_none());

    client.delete_session(session.id).await.unwrap();
    assert!(client.get_session(session.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_book_draft_creates_then_updates() {
    let client = spawn_server().await;

    let draft = BookDraft {
        title: "Demian".to_string(),
        author: "Hesse".to_string(),
        isbn: "111".to_string(),
        published_year: Some(1919),
        ..Default::default()
    };
    let created = draft.submit(&client, None).await.unwrap();
    assert_eq!(created.isbn.as_deref(), Some("111"));

    // Editing the same book: clearing the ISBN field clears it on the server
    let mut draft = BookDraft::from_book(&created);
    draft.isbn.clear();
    draft.description = "Coming of age".to_string();
    let updated = draft.submit(&client, Some(created.id)).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.isbn, None);
    assert_eq!(updated.published_year, Some(1919));
    assert_eq!(updated.description, "Coming of age");

    assert_eq!(client.list_books().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_session_draft_round_trip() {
    let client = spawn_server().await;

    let book = client
        .create_book(&create_request("Siddhartha", None))
        .await
        .unwrap();
    let draft = SessionDraft {
        book_id: Some(book.id),
        date: NaiveDate::from_ymd_opt(2024, 5, 1),
        location: "Stadtbibliothek".to_string(),
        participants: "Anna, Ben".to_string(),
        notes: String::new(),
    };
    let created = draft.submit(&client, None).await.unwrap();
    assert_eq!(created.participants, vec!["Anna", "Ben"]);

    let details = client.get_session(created.id).await.unwrap();
    let mut draft = SessionDraft::from_session(&details);
    assert_eq!(draft.participants, "Anna, Ben");
    draft.participants = "Clara".to_string();

    let updated = draft.submit(&client, Some(created.id)).await.unwrap();
    assert_eq!(updated.participants, vec!["Clara"]);
    assert_eq!(updated.location, "Stadtbibliothek");
}

#[tokio::test]
async fn test_update_unknown_session() {
    let client = spawn_server().await;

    let err = client
        .update_session(Uuid::now_v7(), &Default::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
