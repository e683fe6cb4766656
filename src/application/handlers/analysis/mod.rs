//! Incident analysis handlers.

mod analyze_incident;
mod list_recent_incidents;

pub use analyze_incident::{AnalyzeIncidentCommand, AnalyzeIncidentHandler, AnalyzeIncidentResult};
pub use list_recent_incidents::{
    ListRecentIncidentsHandler, ListRecentIncidentsQuery, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT,
};
