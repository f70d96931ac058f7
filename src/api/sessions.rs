//! Reading sessions API endpoints

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreateSession, MessageResponse, ReadingSession, SessionDetails, UpdateSession},
    AppState,
};

use super::{ApiJson, IdPath};

/// List reading sessions, most recent first, with their books expanded
#[utoipa::path(
    get,
    path = "/sessions",
    tag = "sessions",
    responses(
        (status = 200, description = "All reading sessions", body = Vec<SessionDetails>),
        (status = 500, description = "Database failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_sessions(State(state): State<AppState>) -> AppResult<Json<Vec<SessionDetails>>> {
    let sessions = state.services.sessions.list().await?;
    Ok(Json(sessions))
}

/// Get reading session by ID, with its book expanded
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Reading session ID")),
    responses(
        (status = 200, description = "Reading session details", body = SessionDetails),
        (status = 404, description = "Reading session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
) -> AppResult<Json<SessionDetails>> {
    let session = state.services.sessions.get_by_id(id).await?;
    Ok(Json(session))
}

/// Create a reading session
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "sessions",
    request_body = CreateSession,
    responses(
        (status = 201, description = "Reading session created", body = ReadingSession),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateSession>,
) -> AppResult<(StatusCode, Json<ReadingSession>)> {
    let session = state.services.sessions.create(data).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Update a reading session with the supplied fields
#[utoipa::path(
    put,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Reading session ID")),
    request_body = UpdateSession,
    responses(
        (status = 200, description = "Reading session updated", body = ReadingSession),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Reading session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_session(
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
    ApiJson(data): ApiJson<UpdateSession>,
) -> AppResult<Json<ReadingSession>> {
    let session = state.services.sessions.update(id, data).await?;
    Ok(Json(session))
}

/// Delete a reading session
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = Uuid, Path, description = "Reading session ID")),
    responses(
        (status = 200, description = "Reading session deleted", body = MessageResponse),
        (status = 404, description = "Reading session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    IdPath(id): IdPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.sessions.delete(id).await?;
    Ok(Json(MessageResponse::new("Reading session deleted successfully")))
}
