//! Summary generation.

use super::prioritize::PrioritizedBundle;
use crate::types::compilation::Contradiction;
use crate::types::response::{display_value, ResultRecord};

/// Fields probed, in order, for a one-line description of a result.
pub const SUMMARY_FIELDS: [&str; 6] = [
    "description",
    "summary",
    "title",
    "status",
    "value",
    "result",
];

/// Number of bundles that get a bullet line.
pub const MAX_SUMMARY_SOURCES: usize = 3;

const NO_DETAILS: &str = "No details available";
const ELLIPSIS: &str = "...";

/// Describe a result in one line.
///
/// Uses the first present field of [`SUMMARY_FIELDS`], else the first
/// field as `name: value`.
pub fn format_result_summary(result: &ResultRecord) -> String {
    let Some(fields) = result.as_fields() else {
        return NO_DETAILS.to_string();
    };

    if let Some(value) = SUMMARY_FIELDS.iter().find_map(|f| fields.get(*f)) {
        return display_value(value);
    }

    match fields.first() {
        Some((name, value)) => format!("{}: {}", name, display_value(value)),
        None => NO_DETAILS.to_string(),
    }
}

/// Build the reviewer-facing summary.
///
/// An intro naming every prioritized source, one bullet per top source whose
/// best result is a field mapping, and a warning when contradictions exist.
/// The result never exceeds `max_length` characters.
pub fn generate_summary(
    bundles: &[PrioritizedBundle],
    contradictions: &[Contradiction],
    max_length: usize,
) -> String {
    let names: Vec<&str> = bundles.iter().map(|b| b.source_name.as_str()).collect();
    let mut parts = vec![format!(
        "Based on information from {} systems:",
        names.join(", ")
    )];

    for bundle in bundles.iter().take(MAX_SUMMARY_SOURCES) {
        if let Some(result) = bundle.top_result().filter(|r| r.as_fields().is_some()) {
            parts.push(format!(
                "• {}: {}",
                bundle.source_name,
                format_result_summary(result)
            ));
        }
    }

    if !contradictions.is_empty() {
        parts.push(format!(
            "\n⚠️ Note: {} potential contradiction(s) detected. Please review the detailed results.",
            contradictions.len()
        ));
    }

    truncate_summary(&parts.join("\n"), max_length)
}

/// Cut `text` to `max_length` characters, ending in `...` when cut.
pub fn truncate_summary(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let keep = max_length.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    // budgets below the ellipsis width cut the ellipsis too
    truncated.chars().take(max_length).collect()
}
