//! Cross-source deduplication.
//!
//! Identical facts reported by two domains collapse to one entry, attributed
//! to whichever bundle came first.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::types::response::{display_value, ResponseBundle, ResultRecord, RESERVED_FIELDS};

/// Canonical identity string of a result.
///
/// `field:value` pairs sorted by field name and joined by `|`, skipping
/// reserved fields. Scalars use their string form directly.
pub fn content_key(result: &ResultRecord) -> String {
    match result {
        ResultRecord::Fields(fields) => {
            let mut names: Vec<&String> = fields
                .keys()
                .filter(|k| !RESERVED_FIELDS.contains(&k.as_str()))
                .collect();
            names.sort();
            names
                .into_iter()
                .map(|name| format!("{}:{}", name, display_value(&fields[name])))
                .collect::<Vec<_>>()
                .join("|")
        }
        ResultRecord::Scalar(value) => display_value(value),
    }
}

/// SHA-256 hex digest of a content key.
pub fn content_hash(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Drop every result whose content was already seen in this or an earlier
/// bundle.
///
/// The seen set spans all bundles of one call. Bundles left without results
/// are omitted.
pub fn deduplicate(responses: &[ResponseBundle]) -> Vec<ResponseBundle> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut deduplicated = Vec::new();

    for response in responses {
        let unique: Vec<ResultRecord> = response
            .results
            .iter()
            .filter(|result| {
                let fresh = seen.insert(content_hash(&content_key(result)));
                if !fresh {
                    debug!(agent = %response.source_name, "Duplicate content detected");
                }
                fresh
            })
            .cloned()
            .collect();

        if !unique.is_empty() {
            deduplicated.push(ResponseBundle::new(response.source_name.clone(), unique));
        }
    }

    info!(
        before = total_results(responses),
        after = total_results(&deduplicated),
        "Deduplication complete"
    );
    deduplicated
}

/// Sum of result counts across bundles.
pub fn total_results(responses: &[ResponseBundle]) -> usize {
    responses.iter().map(ResponseBundle::len).sum()
}
