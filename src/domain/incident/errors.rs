//! Incident analysis error types.

use thiserror::Error;

use super::IncidentId;

/// A path segment or number that is not a valid incident id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid incident id: {0}")]
pub struct InvalidIncidentId(pub String);

/// Failure modes of a single analysis run.
///
/// Every variant is raised before the write is committed, so a failed run
/// never leaves a partial analysis behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No incident row matches the id.
    #[error("incident not found: {0}")]
    NotFound(IncidentId),

    /// The inference service could not be reached or refused the request.
    #[error("inference service unavailable: {0}")]
    InferenceUnavailable(String),

    /// The inference service answered with something that is not the
    /// expected JSON object.
    #[error("inference response malformed: {0}")]
    InferenceFormat(String),

    /// The record store could not be reached or rejected the read/write.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AnalysisError {
    pub fn inference_unavailable(message: impl Into<String>) -> Self {
        Self::InferenceUnavailable(message.into())
    }

    pub fn inference_format(message: impl Into<String>) -> Self {
        Self::InferenceFormat(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Stable machine-readable code, used in HTTP error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::NotFound(_) => "NOT_FOUND",
            AnalysisError::InferenceUnavailable(_) => "INFERENCE_UNAVAILABLE",
            AnalysisError::InferenceFormat(_) => "INFERENCE_FORMAT_ERROR",
            AnalysisError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns true if the caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InferenceUnavailable(_) | AnalysisError::StoreUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let id = IncidentId::new(1).unwrap();
        let codes = [
            AnalysisError::NotFound(id).code(),
            AnalysisError::inference_unavailable("x").code(),
            AnalysisError::inference_format("x").code(),
            AnalysisError::store_unavailable("x").code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn retryable_classification() {
        assert!(AnalysisError::inference_unavailable("down").is_retryable());
        assert!(AnalysisError::store_unavailable("down").is_retryable());
        assert!(!AnalysisError::inference_format("bad").is_retryable());
        assert!(!AnalysisError::NotFound(IncidentId::new(3).unwrap()).is_retryable());
    }

    #[test]
    fn displays_incident_id() {
        let err = AnalysisError::NotFound(IncidentId::new(42).unwrap());
        assert_eq!(err.to_string(), "incident not found: 42");
    }
}
