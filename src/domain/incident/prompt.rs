//! Prompt text for incident classification.

/// Role instruction sent as the system prompt on every classification call.
pub const ANALYST_SYSTEM_PROMPT: &str = "You are a Singapore traffic SRE. Analyze the incident \
and return a JSON object with two fields: 'impact_score' (integer 1-10) and 'summary' \
(concise text).";

/// Builds the user message embedding the incident text.
pub fn analysis_request(message: &str) -> String {
    format!("Analyze this LTA incident: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_both_fields() {
        assert!(ANALYST_SYSTEM_PROMPT.contains("'impact_score'"));
        assert!(ANALYST_SYSTEM_PROMPT.contains("'summary'"));
        assert!(ANALYST_SYSTEM_PROMPT.contains("JSON object"));
    }

    #[test]
    fn user_message_embeds_incident_text() {
        assert_eq!(
            analysis_request("Lane closure on PIE due to accident"),
            "Analyze this LTA incident: Lane closure on PIE due to accident"
        );
    }
}
