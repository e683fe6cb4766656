//! HTTP DTOs for incident analysis endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::AnalyzeIncidentResult;
use crate::domain::incident::Incident;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for listing incidents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListIncidentsQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body returned by `POST /analyze/:incident_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeIncidentResponse {
    pub status: String,
    /// The summary that was written to `ai_analysis`.
    pub analysis: String,
}

impl From<AnalyzeIncidentResult> for AnalyzeIncidentResponse {
    fn from(result: AnalyzeIncidentResult) -> Self {
        Self {
            status: "success".to_string(),
            analysis: result.classification.summary,
        }
    }
}

/// One incident row for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    pub message: String,
    pub impact_score: Option<i32>,
    pub ai_analysis: Option<String>,
    pub created_at: String,
}

impl From<Incident> for IncidentResponse {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.id.as_i32(),
            kind: incident.kind,
            latitude: incident.latitude,
            longitude: incident.longitude,
            message: incident.message,
            impact_score: incident.impact_score,
            ai_analysis: incident.ai_analysis,
            created_at: incident.created_at.to_rfc3339(),
        }
    }
}

/// Recent incidents, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentListResponse {
    pub items: Vec<IncidentResponse>,
    pub count: usize,
}

impl From<Vec<Incident>> for IncidentListResponse {
    fn from(incidents: Vec<Incident>) -> Self {
        let items: Vec<IncidentResponse> = incidents.into_iter().map(Into::into).collect();
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}
