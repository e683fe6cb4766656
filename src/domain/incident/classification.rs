//! Classification verdict returned by the inference service.
//!
//! The model is asked for a JSON object with two keys, `impact_score` and
//! `summary`. Missing keys fall back to defaults so a partially-compliant
//! answer still produces a stored verdict; an answer that is not a JSON
//! object at all is rejected.

use serde::Deserialize;
use serde_json::Value;

use super::AnalysisError;

/// Score stored when the model omits `impact_score`.
pub const DEFAULT_IMPACT_SCORE: i32 = 0;

/// Summary stored when the model omits `summary`.
pub const DEFAULT_SUMMARY: &str = "Analysis failed.";

/// Lowest and highest score the model is asked to produce.
pub const IMPACT_SCORE_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// Transient verdict carried from the inference call to the store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub impact_score: i32,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    impact_score: Option<i32>,
    summary: Option<String>,
}

impl ClassificationResult {
    pub fn new(impact_score: i32, summary: impl Into<String>) -> Self {
        Self {
            impact_score,
            summary: summary.into(),
        }
    }

    /// Parses the model's raw reply.
    ///
    /// `null` is treated the same as an absent key. A key holding the wrong
    /// JSON type is a format error, as is any top-level value other than an
    /// object.
    pub fn from_model_output(content: &str) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_str(content.trim())
            .map_err(|e| AnalysisError::inference_format(format!("invalid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(AnalysisError::inference_format(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }

        let raw: RawClassification = serde_json::from_value(value)
            .map_err(|e| AnalysisError::inference_format(e.to_string()))?;

        Ok(Self {
            impact_score: raw.impact_score.unwrap_or(DEFAULT_IMPACT_SCORE),
            summary: raw.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        })
    }

    pub fn is_score_in_range(&self) -> bool {
        IMPACT_SCORE_RANGE.contains(&self.impact_score)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_complete_verdict() {
        let result = ClassificationResult::from_model_output(
            r#"{"impact_score": 6, "summary": "Moderate delay expected on PIE."}"#,
        )
        .unwrap();

        assert_eq!(result, ClassificationResult::new(6, "Moderate delay expected on PIE."));
        assert!(result.is_score_in_range());
    }

    #[test]
    fn missing_summary_uses_default() {
        let result = ClassificationResult::from_model_output(r#"{"impact_score": 8}"#).unwrap();
        assert_eq!(result.impact_score, 8);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn missing_both_fields_uses_defaults() {
        let result = ClassificationResult::from_model_output("{}").unwrap();
        assert_eq!(result.impact_score, DEFAULT_IMPACT_SCORE);
        assert_eq!(result.summary, "Analysis failed.");
        assert!(!result.is_score_in_range());
    }

    #[test]
    fn null_fields_use_defaults() {
        let result =
            ClassificationResult::from_model_output(r#"{"impact_score": null, "summary": null}"#)
                .unwrap();
        assert_eq!(result, ClassificationResult::new(0, DEFAULT_SUMMARY));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let result = ClassificationResult::from_model_output(
            r#"{"impact_score": 3, "summary": "Minor.", "confidence": 0.9}"#,
        )
        .unwrap();
        assert_eq!(result, ClassificationResult::new(3, "Minor."));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let result =
            ClassificationResult::from_model_output("\n  {\"impact_score\": 2}\n").unwrap();
        assert_eq!(result.impact_score, 2);
    }

    #[test]
    fn prose_is_a_format_error() {
        let err = ClassificationResult::from_model_output("The impact is high.").unwrap_err();
        assert!(matches!(err, AnalysisError::InferenceFormat(_)));
    }

    #[test]
    fn non_object_json_is_a_format_error() {
        for content in ["[6, \"summary\"]", "6", "\"text\"", "null", "true"] {
            let err = ClassificationResult::from_model_output(content).unwrap_err();
            assert!(
                matches!(err, AnalysisError::InferenceFormat(_)),
                "{} should be rejected",
                content
            );
        }
    }

    #[test]
    fn wrongly_typed_fields_are_format_errors() {
        for content in [
            r#"{"impact_score": "high"}"#,
            r#"{"impact_score": 6.5}"#,
            r#"{"impact_score": 99999999999}"#,
            r#"{"summary": 12}"#,
            r#"{"summary": ["a", "b"]}"#,
        ] {
            let err = ClassificationResult::from_model_output(content).unwrap_err();
            assert!(matches!(err, AnalysisError::InferenceFormat(_)), "{}", content);
        }
    }

    #[test]
    fn out_of_range_score_is_kept_as_given() {
        let result =
            ClassificationResult::from_model_output(r#"{"impact_score": 42, "summary": "x"}"#)
                .unwrap();
        assert_eq!(result.impact_score, 42);
        assert!(!result.is_score_in_range());
    }

    proptest! {
        #[test]
        fn any_well_typed_object_round_trips(score in any::<i32>(), summary in ".*") {
            let content = serde_json::json!({ "impact_score": score, "summary": summary }).to_string();
            let result = ClassificationResult::from_model_output(&content).unwrap();
            prop_assert_eq!(result.impact_score, score);
            prop_assert_eq!(result.summary, summary);
        }

        #[test]
        fn arbitrary_text_never_panics(content in ".*") {
            let _ = ClassificationResult::from_model_output(&content);
        }
    }
}
