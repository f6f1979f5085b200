//! Contradiction detection across sources.
//!
//! Collects every value reported for each field name and flags fields with
//! more than one distinct string form. Without a scope key the comparison is
//! global, so unrelated records sharing a field name (a test `status` and a
//! batch `status`) are reported too.

use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::warn;

use super::prioritize::PrioritizedBundle;
use crate::types::compilation::{Contradiction, ObservedValue, Severity};
use crate::types::response::display_value;

/// Find fields whose observed values disagree.
///
/// Values are compared by their string form, case- and type-sensitively as
/// rendered. Reserved fields are compared like any other field. Output order
/// follows the first appearance of each field in priority order.
pub fn detect_contradictions(
    bundles: &[PrioritizedBundle],
    scope_key: Option<&str>,
) -> Vec<Contradiction> {
    // (scope value, field) -> observed values
    let mut field_values: IndexMap<(Option<String>, String), Vec<ObservedValue>> =
        IndexMap::new();

    for bundle in bundles {
        for scored in &bundle.results {
            let Some(fields) = scored.result.as_fields() else {
                continue;
            };

            let scope = match scope_key {
                Some(key) => match scored.result.get(key) {
                    Some(value) => Some(display_value(value)),
                    None => continue,
                },
                None => None,
            };

            for (field, value) in fields {
                if scope_key == Some(field.as_str()) {
                    continue;
                }
                field_values
                    .entry((scope.clone(), field.clone()))
                    .or_default()
                    .push(ObservedValue {
                        agent: bundle.source_name.clone(),
                        value: value.clone(),
                    });
            }
        }
    }

    let contradictions: Vec<Contradiction> = field_values
        .into_iter()
        .filter(|(_, values)| values.len() > 1)
        .filter(|(_, values)| {
            let distinct: HashSet<String> =
                values.iter().map(|v| display_value(&v.value)).collect();
            distinct.len() > 1
        })
        .map(|((scope, field), conflicting_values)| Contradiction {
            field,
            conflicting_values,
            severity: Severity::Medium,
            scope,
        })
        .collect();

    if !contradictions.is_empty() {
        warn!(
            count = contradictions.len(),
            fields = ?contradictions.iter().map(|c| c.field.as_str()).collect::<Vec<_>>(),
            "Detected contradictions in responses"
        );
    }
    contradictions
}
