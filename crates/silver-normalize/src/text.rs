//! Identifier and name normalization.

use silver_model::ReasonCode;

use crate::outcome::Normalized;

/// Trims surrounding whitespace from a patient identifier.
pub fn normalize_identifier(raw: &str) -> Normalized<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::invalid(String::new(), ReasonCode::MissingId);
    }
    Normalized::ok(trimmed.to_string())
}

/// Trims a person name and collapses internal whitespace runs to one space.
///
/// Casing is preserved as supplied by the source.
pub fn normalize_name(raw: &str) -> Normalized<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Normalized::invalid(collapsed, ReasonCode::MissingName);
    }
    Normalized::ok(collapsed)
}
