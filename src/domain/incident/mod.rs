//! Incident module - traffic incidents and their AI classification.
//!
//! An incident is ingested upstream with a free-text `message`; this service
//! classifies it and writes back an `impact_score` and `ai_analysis`.

mod classification;
mod errors;
mod ids;
mod prompt;
mod record;

pub use classification::{
    ClassificationResult, DEFAULT_IMPACT_SCORE, DEFAULT_SUMMARY, IMPACT_SCORE_RANGE,
};
pub use errors::{AnalysisError, InvalidIncidentId};
pub use ids::IncidentId;
pub use prompt::{analysis_request, ANALYST_SYSTEM_PROMPT};
pub use record::Incident;
