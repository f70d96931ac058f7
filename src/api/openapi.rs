//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, sessions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Club API",
        version = "0.1.0",
        description = "Books and reading sessions REST API"
    ),
    servers(
        (url = "/api", description = "Book club API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Reading sessions
        sessions::list_sessions,
        sessions::get_session,
        sessions::create_session,
        sessions::update_session,
        sessions::delete_session,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Reading sessions
            crate::models::session::ReadingSession,
            crate::models::session::SessionDetails,
            crate::models::session::CreateSession,
            crate::models::session::UpdateSession,
            // Common
            crate::models::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book management"),
        (name = "sessions", description = "Reading session management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
