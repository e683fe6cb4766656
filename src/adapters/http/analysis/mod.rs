//! HTTP adapter for incident analysis endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalyzeIncidentResponse, ErrorResponse, IncidentListResponse, IncidentResponse,
    ListIncidentsQuery,
};
pub use handlers::AnalysisAppState;
pub use routes::analysis_router;
