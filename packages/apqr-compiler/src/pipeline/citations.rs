//! Citation extraction and detail assembly.

use super::prioritize::PrioritizedBundle;
use crate::types::compilation::{
    Contradiction, ContradictionReport, Detail, DetailContent, COMPILER_SOURCE,
};

/// One citation per bundle that contributed results, in priority order.
pub fn extract_citations(bundles: &[PrioritizedBundle]) -> Vec<String> {
    bundles
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| format!("{} Agent ({} result(s))", b.source_name, b.len()))
        .collect()
}

/// Flatten the prioritized results into attributed, scored details.
///
/// When contradictions exist, one report attributed to the compiler is
/// appended with a relevance of 1.0.
pub fn prepare_details(
    bundles: &[PrioritizedBundle],
    contradictions: &[Contradiction],
) -> Vec<Detail> {
    let mut details: Vec<Detail> = bundles
        .iter()
        .flat_map(|bundle| {
            bundle.results.iter().map(move |scored| Detail {
                source_agent: bundle.source_name.clone(),
                content: DetailContent::Result(scored.result.clone()),
                relevance_score: scored.score,
            })
        })
        .collect();

    if !contradictions.is_empty() {
        details.push(Detail {
            source_agent: COMPILER_SOURCE.to_string(),
            content: DetailContent::Contradictions(ContradictionReport {
                items: contradictions.to_vec(),
            }),
            relevance_score: 1.0,
        });
    }

    details
}
