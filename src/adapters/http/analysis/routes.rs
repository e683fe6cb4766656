//! Route configuration for incident analysis endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{analyze_incident, list_incidents, AnalysisAppState};

/// Creates the analysis router.
///
/// Routes:
/// - `POST /analyze/:incident_id` - Classify an incident and store the verdict
/// - `GET /incidents?limit=N` - Latest incidents, newest first
pub fn analysis_router() -> Router<AnalysisAppState> {
    Router::new()
        .route("/analyze/:incident_id", post(analyze_incident))
        .route("/incidents", get(list_incidents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryIncidentStore;
    use crate::domain::incident::IncidentId;
    use crate::ports::{AIError, StoreError};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: &InMemoryIncidentStore, provider: MockAIProvider) -> Router {
        let state = AnalysisAppState::new(Arc::new(store.clone()), Arc::new(provider));
        analysis_router().with_state(state)
    }

    fn seeded_store() -> InMemoryIncidentStore {
        let store = InMemoryIncidentStore::new();
        store.insert_message(
            IncidentId::new(42).unwrap(),
            "Lane closure on PIE due to accident",
        );
        store
    }

    async fn post(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn analyze_returns_success_body() {
        let store = seeded_store();
        let provider = MockAIProvider::new()
            .with_response(r#"{"impact_score": 6, "summary": "Moderate delay expected on PIE."}"#);

        let (status, body) = post(app(&store, provider), "/analyze/42").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"status": "success", "analysis": "Moderate delay expected on PIE."})
        );
    }

    #[tokio::test]
    async fn analyze_unknown_incident_is_404() {
        let store = seeded_store();
        let (status, body) = post(app(&store, MockAIProvider::new()), "/analyze/7").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(store.committed_writes(), 0);
    }

    #[tokio::test]
    async fn analyze_invalid_id_is_400() {
        let store = seeded_store();
        for uri in ["/analyze/abc", "/analyze/0", "/analyze/-3"] {
            let (status, body) = post(app(&store, MockAIProvider::new()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["code"], "BAD_REQUEST");
        }
    }

    #[tokio::test]
    async fn analyze_malformed_reply_is_502() {
        let store = seeded_store();
        let provider = MockAIProvider::new().with_response("not json at all");

        let (status, body) = post(app(&store, provider), "/analyze/42").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "INFERENCE_FORMAT_ERROR");
    }

    #[tokio::test]
    async fn analyze_provider_outage_is_503() {
        let store = seeded_store();
        let provider = MockAIProvider::new().with_error(AIError::unavailable("overloaded"));

        let (status, body) = post(app(&store, provider), "/analyze/42").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "INFERENCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn analyze_store_outage_is_500() {
        let store = seeded_store();
        store.fail_next_begin(StoreError::connection("refused"));

        let (status, body) = post(app(&store, MockAIProvider::new()), "/analyze/42").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn analyze_rejects_get() {
        let store = seeded_store();
        let response = app(&store, MockAIProvider::new())
            .oneshot(
                Request::builder()
                    .uri("/analyze/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn list_incidents_rejects_malformed_limit_with_json_error() {
        let store = seeded_store();
        for uri in ["/incidents?limit=abc", "/incidents?limit=-1"] {
            let response = app(&store, MockAIProvider::new())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["code"], "BAD_REQUEST");
            assert!(body["message"]
                .as_str()
                .unwrap()
                .starts_with("Failed to deserialize query string"));
        }
    }

    #[tokio::test]
    async fn list_incidents_returns_items() {
        let store = seeded_store();
        let response = app(&store, MockAIProvider::new())
            .oneshot(
                Request::builder()
                    .uri("/incidents?limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["id"], 42);
        assert_eq!(body["items"][0]["message"], "Lane closure on PIE due to accident");
    }
}
