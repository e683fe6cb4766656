//! AnalyzeIncidentHandler - Command handler for classifying an incident.
//!
//! Loads the incident text, asks the inference service for an impact score
//! and summary, and writes the verdict back. The store connection is held by
//! a unit of work for the whole run and released on every return path; the
//! write is committed only after a verdict has been parsed.
//!
//! Concurrent runs on the same incident are not coordinated. Each commits its
//! own verdict and the last commit wins.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::incident::{
    analysis_request, AnalysisError, ClassificationResult, IncidentId, ANALYST_SYSTEM_PROMPT,
};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FinishReason, IncidentStore, MessageRole,
    RequestMetadata, StoreError,
};

/// Command to analyze one incident.
#[derive(Debug, Clone)]
pub struct AnalyzeIncidentCommand {
    pub incident_id: IncidentId,
    /// Correlates the inference call with the inbound request.
    pub trace_id: String,
}

/// Result of a successful analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeIncidentResult {
    pub incident_id: IncidentId,
    /// Exactly what was written to `impact_score` / `ai_analysis`.
    pub classification: ClassificationResult,
}

/// Handler for incident analysis.
pub struct AnalyzeIncidentHandler {
    store: Arc<dyn IncidentStore>,
    provider: Arc<dyn AIProvider>,
}

impl AnalyzeIncidentHandler {
    pub fn new(store: Arc<dyn IncidentStore>, provider: Arc<dyn AIProvider>) -> Self {
        Self { store, provider }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeIncidentCommand,
    ) -> Result<AnalyzeIncidentResult, AnalysisError> {
        let started = Instant::now();
        let incident_id = cmd.incident_id;

        // 1. Scoped connection
        let mut unit = self.store.begin().await.map_err(store_error)?;

        // 2. Load incident text
        let message = unit
            .find_message(incident_id)
            .await
            .map_err(store_error)?
            .ok_or(AnalysisError::NotFound(incident_id))?;

        // 3. Classify
        let request = CompletionRequest::new(RequestMetadata::new(cmd.trace_id))
            .with_system_prompt(ANALYST_SYSTEM_PROMPT)
            .with_message(MessageRole::User, analysis_request(&message))
            .with_json_output();

        let response = self.provider.complete(request).await.map_err(|e| {
            tracing::warn!(incident_id = %incident_id, error = %e, "Inference call failed");
            inference_error(e)
        })?;

        // 4. Parse
        let truncated = response.finish_reason == FinishReason::Length;
        let classification =
            ClassificationResult::from_model_output(&response.content).map_err(|e| {
                tracing::warn!(
                    incident_id = %incident_id,
                    model = %response.model,
                    truncated,
                    error = %e,
                    "Inference response rejected"
                );
                match e {
                    AnalysisError::InferenceFormat(message) if truncated => {
                        AnalysisError::inference_format(format!(
                            "{} (reply cut off at the output token limit)",
                            message
                        ))
                    }
                    other => other,
                }
            })?;

        if !classification.is_score_in_range() {
            tracing::warn!(
                incident_id = %incident_id,
                impact_score = classification.impact_score,
                "Impact score outside 1-10"
            );
        }

        // 5. Persist
        unit.record_analysis(incident_id, &classification)
            .await
            .map_err(store_error)?;
        unit.commit().await.map_err(store_error)?;

        tracing::info!(
            incident_id = %incident_id,
            impact_score = classification.impact_score,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Incident analyzed"
        );

        Ok(AnalyzeIncidentResult {
            incident_id,
            classification,
        })
    }
}

fn store_error(err: StoreError) -> AnalysisError {
    match err {
        StoreError::NotFound(id) => AnalysisError::NotFound(id),
        other => AnalysisError::store_unavailable(other.to_string()),
    }
}

fn inference_error(err: AIError) -> AnalysisError {
    match err {
        AIError::Parse(message) => AnalysisError::inference_format(message),
        other => AnalysisError::inference_unavailable(other.to_string()),
    }
}
