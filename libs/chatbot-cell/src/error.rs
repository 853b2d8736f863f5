use thiserror::Error;
use uuid::Uuid;

use shared_models::AppError;

#[derive(Error, Debug)]
pub enum ChatbotError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("A reply is already being composed for this conversation")]
    ReplyInProgress,

    #[error("Chat session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Doctor directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Internal chatbot error: {0}")]
    Internal(String),
}

impl From<ChatbotError> for AppError {
    fn from(err: ChatbotError) -> Self {
        match err {
            ChatbotError::EmptyMessage => AppError::BadRequest(err.to_string()),
            ChatbotError::ReplyInProgress => AppError::Conflict(err.to_string()),
            ChatbotError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            ChatbotError::DirectoryUnavailable(_) => AppError::ExternalService(err.to_string()),
            ChatbotError::KnowledgeBase(_) | ChatbotError::Internal(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}
