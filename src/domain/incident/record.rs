//! Read model of a stored incident.

use chrono::{DateTime, Utc};

use super::IncidentId;

/// A traffic incident as stored, including any analysis already written.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub id: IncidentId,
    /// Incident category from the LTA feed (e.g. "Accident", "Roadworks").
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    pub message: String,
    pub impact_score: Option<i32>,
    pub ai_analysis: Option<String>,
    pub created_at: DateTime<Utc>,
}
