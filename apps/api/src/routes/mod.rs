pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview_handlers;
use crate::narration::handlers as narration_handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume intake
        .route(
            "/api/v1/resumes/parse",
            post(resume_handlers::handle_parse_resume),
        )
        // Interview lifecycle
        .route("/api/v1/interviews", post(interview_handlers::handle_start))
        .route(
            "/api/v1/interviews/:id/answer",
            post(interview_handlers::handle_answer),
        )
        .route(
            "/api/v1/interviews/:id/progress",
            get(interview_handlers::handle_progress),
        )
        .route(
            "/api/v1/interviews/:id/responses/score",
            post(interview_handlers::handle_score_response),
        )
        .route(
            "/api/v1/interviews/:id/report",
            post(interview_handlers::handle_report),
        )
        // Narration clip cache (collaborator interface for avatar vendors)
        .route(
            "/api/v1/narration/cache/stats",
            get(narration_handlers::handle_cache_stats),
        )
        .route(
            "/api/v1/narration/cache",
            get(narration_handlers::handle_cache_lookup)
                .put(narration_handlers::handle_cache_store),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::narration::NarrationCache;
    use crate::session::SessionStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            llm: LlmClient::new("test-key".to_string()),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                max_questions: 8,
            },
            sessions: SessionStore::new(),
            narration_cache: Arc::new(Mutex::new(NarrationCache::default())),
        }
    }

    #[tokio::test]
    async fn test_health_route_responds_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_interview_returns_404() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/api/v1/interviews/{}/progress",
                        uuid::Uuid::new_v4()
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_narration_cache_lookup_misses_with_404() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/narration/cache?voice_id=v1&text=Great!")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
