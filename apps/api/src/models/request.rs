//! Helpers for the loosely typed request bodies the front-end sends.
//!
//! Every field is optional and may be `null`; blanks fall back to defaults.

/// Trimmed value, or `default` when missing or blank.
pub fn trimmed_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Trimmed value, or an empty string.
pub fn trimmed(value: &Option<String>) -> String {
    trimmed_or(value, "")
}

/// Lowercased language code, `"en"` when absent.
pub fn language_code(value: &Option<String>) -> String {
    trimmed_or(value, "en").to_lowercase()
}
