// Shared prompt fragments and prompt-building utilities.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Appended to every prompt whose output is parsed as JSON.
pub const JSON_ONLY_RULES: &str = "\
Strict JSON rules:
- Respond ONLY with a single JSON object.
- No Markdown, no backticks, no text before or after the JSON.
- All keys must be present, even if some values are empty strings or empty arrays.";

/// Shared safety guardrails for every spiritual-guidance persona.
pub const SAFETY_GUARDRAILS: &str = "\
Safety (non-negotiable):
- You are NOT a doctor, therapist, lawyer or financial advisor.
- Do NOT diagnose, and do NOT give medical, legal or financial prescriptions.
- If the user hints at self-harm, abuse, violence or severe distress, gently encourage them \
to reach out to a trusted person or a qualified professional in real life. \
Stay supportive, not alarmist.";

/// Maps a UI language code to the label used inside prompts.
pub fn language_label(code: &str) -> &'static str {
    match code.trim().to_lowercase().as_str() {
        "hi" => "Hindi",
        "gu" => "Gujarati",
        _ => "English",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_label_known_codes() {
        assert_eq!(language_label("hi"), "Hindi");
        assert_eq!(language_label("GU"), "Gujarati");
        assert_eq!(language_label("en"), "English");
    }

    #[test]
    fn test_language_label_defaults_to_english() {
        assert_eq!(language_label("fr"), "English");
        assert_eq!(language_label(""), "English");
    }
}
