//! HTTP handlers for incident analysis endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    AnalyzeIncidentCommand, AnalyzeIncidentHandler, ListRecentIncidentsHandler,
    ListRecentIncidentsQuery,
};
use crate::domain::incident::{AnalysisError, IncidentId};
use crate::ports::{AIProvider, IncidentStore};

use super::dto::{AnalyzeIncidentResponse, ErrorResponse, IncidentListResponse, ListIncidentsQuery};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for analysis routes.
#[derive(Clone)]
pub struct AnalysisAppState {
    analyze_handler: Arc<AnalyzeIncidentHandler>,
    list_handler: Arc<ListRecentIncidentsHandler>,
}

impl AnalysisAppState {
    pub fn new(store: Arc<dyn IncidentStore>, provider: Arc<dyn AIProvider>) -> Self {
        Self {
            analyze_handler: Arc::new(AnalyzeIncidentHandler::new(store.clone(), provider)),
            list_handler: Arc::new(ListRecentIncidentsHandler::new(store)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /analyze/:incident_id - Classify an incident and store the verdict
pub async fn analyze_incident(
    State(state): State<AnalysisAppState>,
    headers: HeaderMap,
    Path(incident_id): Path<String>,
) -> Response {
    let incident_id = match incident_id.parse::<IncidentId>() {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let trace_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();

    let cmd = AnalyzeIncidentCommand {
        incident_id,
        trace_id,
    };

    match state.analyze_handler.handle(cmd).await {
        Ok(result) => {
            let response: AnalyzeIncidentResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_analysis_error(e),
    }
}

/// GET /incidents - Latest incidents with any stored analysis
pub async fn list_incidents(
    State(state): State<AnalysisAppState>,
    params: Result<Query<ListIncidentsQuery>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response()
        }
    };

    let query = ListRecentIncidentsQuery {
        limit: params.limit,
    };

    match state.list_handler.handle(query).await {
        Ok(incidents) => {
            let response: IncidentListResponse = incidents.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list incidents");
            handle_analysis_error(AnalysisError::store_unavailable(e.to_string()))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_analysis_error(error: AnalysisError) -> Response {
    let status = match &error {
        AnalysisError::NotFound(_) => StatusCode::NOT_FOUND,
        AnalysisError::InferenceFormat(_) => StatusCode::BAD_GATEWAY,
        AnalysisError::InferenceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AnalysisError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(code = error.code(), error = %error, "Incident analysis failed");
    }

    (
        status,
        Json(ErrorResponse::new(error.code(), error.to_string())),
    )
        .into_response()
}
