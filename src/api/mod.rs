pub mod employee;
pub mod meeting;

use serde_json::Value;

/// Truthiness gate over a raw JSON payload field: present, a string, and
/// non-empty. Whitespace-only values pass; normalization happens at the
/// call site.
pub(crate) fn required_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
