//! Relevance scoring and prioritization.
//!
//! Scores are keyword overlap fractions, not semantic similarity: a result
//! scores 1.0 when every distinct query word appears among its words.

use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

use crate::types::response::{ResponseBundle, ResultRecord};

/// A result paired with its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub result: ResultRecord,
    pub score: f64,
}

/// A bundle after prioritization: best result first.
#[derive(Debug, Clone, PartialEq)]
pub struct PrioritizedBundle {
    pub source_name: String,
    pub results: Vec<ScoredResult>,
}

impl PrioritizedBundle {
    /// Highest result score, 0.0 for an empty bundle.
    pub fn top_score(&self) -> f64 {
        self.results.first().map(|r| r.score).unwrap_or(0.0)
    }

    /// The highest-ranked result.
    pub fn top_result(&self) -> Option<&ResultRecord> {
        self.results.first().map(|r| &r.result)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Distinct lower-cased whitespace-separated words of a query.
pub fn query_keywords(query: &str) -> HashSet<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Fraction of query keywords that appear as whole words in the result.
///
/// Always in `[0.0, 1.0]`; 0.0 when the query has no keywords.
pub fn relevance_score(result: &ResultRecord, keywords: &HashSet<String>) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let text = result.flattened_text();
    let words: HashSet<&str> = text.split_whitespace().collect();
    let overlap = keywords
        .iter()
        .filter(|k| words.contains(k.as_str()))
        .count();

    overlap as f64 / keywords.len() as f64
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Score every result, order results within each bundle, then order the
/// bundles by their best result.
///
/// Both sorts are stable: equal scores keep their input order.
pub fn prioritize(responses: Vec<ResponseBundle>, query: &str) -> Vec<PrioritizedBundle> {
    let keywords = query_keywords(query);

    let mut prioritized: Vec<PrioritizedBundle> = responses
        .into_iter()
        .map(|bundle| {
            let mut results: Vec<ScoredResult> = bundle
                .results
                .into_iter()
                .map(|result| {
                    let score = relevance_score(&result, &keywords);
                    ScoredResult { result, score }
                })
                .collect();
            results.sort_by(|a, b| descending(a.score, b.score));

            PrioritizedBundle {
                source_name: bundle.source_name,
                results,
            }
        })
        .collect();

    prioritized.sort_by(|a, b| descending(a.top_score(), b.top_score()));

    debug!(
        order = ?prioritized.iter().map(|b| b.source_name.as_str()).collect::<Vec<_>>(),
        "Prioritization complete"
    );
    prioritized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> ResultRecord {
        ResultRecord::fields(pairs.iter().map(|(k, v)| (*k, json!(v))))
    }

    #[test]
    fn test_query_keywords_are_distinct_and_lowercased() {
        let keywords = query_keywords("Assay assay  RESULTS");
        assert_eq!(keywords.len(), 2);
        assert!(keywords.contains("assay"));
        assert!(keywords.contains("results"));
    }

    #[test]
    fn test_relevance_score_counts_whole_words() {
        let keywords = query_keywords("assay lot-12345 yield");
        let result = record(&[("test", "Assay"), ("lot_number", "LOT-12345")]);

        let score = relevance_score(&result, &keywords);
        assert!((score - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_relevance_score_ignores_substrings() {
        let keywords = query_keywords("lot");
        let result = record(&[("lot_number", "LOT-12345")]);
        assert_eq!(relevance_score(&result, &keywords), 0.0);
    }

    #[test]
    fn test_relevance_score_empty_query() {
        let result = record(&[("test", "Assay")]);
        assert_eq!(relevance_score(&result, &query_keywords("   ")), 0.0);
    }

    #[test]
    fn test_relevance_score_scalar() {
        let keywords = query_keywords("batch released");
        let result = ResultRecord::scalar("Batch released on time");
        assert_eq!(relevance_score(&result, &keywords), 1.0);
    }

    #[test]
    fn test_prioritize_orders_results_within_bundle() {
        let responses = vec![ResponseBundle::new(
            "LIMS",
            vec![
                record(&[("test", "Dissolution")]),
                record(&[("test", "Assay")]),
            ],
        )];

        let prioritized = prioritize(responses, "assay");

        assert_eq!(prioritized[0].results[0].score, 1.0);
        assert_eq!(prioritized[0].results[0].result, record(&[("test", "Assay")]));
        assert_eq!(prioritized[0].results[1].score, 0.0);
    }

    #[test]
    fn test_prioritize_orders_bundles_by_best_result() {
        let responses = vec![
            ResponseBundle::new("ERP", vec![record(&[("status", "Released")])]),
            ResponseBundle::new("LIMS", vec![record(&[("test", "Assay")])]),
        ];

        let prioritized = prioritize(responses, "assay");

        assert_eq!(prioritized[0].source_name, "LIMS");
        assert_eq!(prioritized[1].source_name, "ERP");
    }

    #[test]
    fn test_prioritize_is_stable_on_ties() {
        let responses = vec![
            ResponseBundle::new("DMS", vec![record(&[("a", "1")]), record(&[("a", "2")])]),
            ResponseBundle::new("ERP", vec![record(&[("a", "3")])]),
            ResponseBundle::empty("LIMS"),
        ];

        let prioritized = prioritize(responses, "unrelated");

        let order: Vec<_> = prioritized.iter().map(|b| b.source_name.as_str()).collect();
        assert_eq!(order, vec!["DMS", "ERP", "LIMS"]);
        assert_eq!(prioritized[0].results[0].result, record(&[("a", "1")]));
        assert_eq!(prioritized[2].top_score(), 0.0);
    }
}
