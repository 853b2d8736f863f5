use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_models::AppError;

use crate::error::ChatbotError;
use crate::models::{
    ChatMessageRequest, ChatReplyResponse, ConversationEntry, DirectoryRefreshResponse,
    TranscriptView,
};
use crate::state::ChatbotState;

// ==============================================================================
// SESSIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<Arc<ChatbotState>>,
) -> (StatusCode, Json<TranscriptView>) {
    let session = state.sessions.open().await;

    // Each new chat widget pulls a fresh doctor list.
    state.directory.spawn_refresh();

    (StatusCode::CREATED, Json(session.view()))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<ChatbotState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TranscriptView>, AppError> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session.view()))
}

#[axum::debug_handler]
pub async fn close_session(
    State(state): State<Arc<ChatbotState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.close(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<ChatbotState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatReplyResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let reply = session.submit(&request.message).await?;
    Ok(Json(reply))
}

// ==============================================================================
// STATELESS QUERY
// ==============================================================================

#[axum::debug_handler]
pub async fn query(
    State(state): State<Arc<ChatbotState>>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatReplyResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(ChatbotError::EmptyMessage.into());
    }

    let (intent, reply) = state.assistant.answer(&request.message);
    debug!("Answered one-off {} query", intent.kind());

    Ok(Json(ChatReplyResponse {
        intent,
        reply: ConversationEntry::bot(&reply),
    }))
}

// ==============================================================================
// DOCTOR DIRECTORY
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<ChatbotState>>) -> Json<Value> {
    let doctors = state.directory.all();

    Json(json!({
        "doctors": doctors.as_slice(),
        "total": doctors.len(),
        "last_refreshed": state.directory.last_refreshed(),
    }))
}

#[axum::debug_handler]
pub async fn refresh_doctors(
    State(state): State<Arc<ChatbotState>>,
) -> Json<DirectoryRefreshResponse> {
    let outcome = state.directory.refresh().await;

    Json(DirectoryRefreshResponse {
        outcome: outcome.label(),
        total: state.directory.len(),
    })
}
