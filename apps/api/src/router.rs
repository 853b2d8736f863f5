use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use chatbot_cell::{chatbot_routes, ChatbotState};

pub fn create_router(chatbot: Arc<ChatbotState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital chatbot API is running!" }))
        .nest("/chatbot", chatbot_routes(chatbot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use chatbot_cell::{DoctorDirectoryCache, IntentResolver, KnowledgeBase};
    use shared_utils::test_utils::TestDoctors;

    fn test_state() -> Arc<ChatbotState> {
        Arc::new(ChatbotState::new(
            Arc::new(DoctorDirectoryCache::with_doctors(TestDoctors::directory())),
            KnowledgeBase::default(),
            IntentResolver::default(),
            Duration::ZERO,
        ))
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let response = create_router(test_state())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chatbot_routes_are_nested() {
        let response = create_router(test_state())
            .oneshot(
                Request::builder()
                    .uri("/chatbot/doctors")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
