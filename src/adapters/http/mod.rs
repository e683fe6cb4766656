//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles every endpoint behind the request-id and trace layers.

pub mod analysis;

pub use analysis::{analysis_router, AnalysisAppState, ErrorResponse};

use axum::routing::get;
use axum::{Json, Router};
use http::{HeaderName, Request};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the service router.
///
/// Incoming `x-request-id` headers are kept; requests without one get a UUID.
/// The id is echoed on the response and recorded on the request span.
pub fn app_router(state: AnalysisAppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(analysis_router().with_state(state))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &Request<axum::body::Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("-");
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    },
                ))
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
