use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::ChatbotState;

pub fn chatbot_routes(state: Arc<ChatbotState>) -> Router {
    Router::new()
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::close_session),
        )
        .route("/sessions/{session_id}/messages", post(handlers::send_message))
        .route("/query", post(handlers::query))
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors/refresh", post(handlers::refresh_doctors))
        .with_state(state)
}
