//! The compiler - chains the pipeline stages.

use tracing::info;

use super::citations::{extract_citations, prepare_details};
use super::contradictions::detect_contradictions;
use super::dedup::{deduplicate, total_results};
use super::prioritize::prioritize;
use super::summary::generate_summary;
use crate::types::compilation::{CompilationMetadata, CompilationResult};
use crate::types::config::CompilerConfig;
use crate::types::response::ResponseBundle;

/// Synthesizes the responses of several sources into one compilation.
///
/// Each call runs, in order: deduplicate, prioritize, detect contradictions,
/// summarize, cite, assemble details. Every stage consumes only the previous
/// stage's output. Calls share nothing but the read-only config, so one
/// compiler can be used from many threads.
///
/// # Example
///
/// ```rust
/// use apqr_compiler::{Compiler, ResponseBundle, ResultRecord};
/// use serde_json::json;
///
/// let compiler = Compiler::default();
/// let responses = vec![ResponseBundle::new(
///     "LIMS",
///     vec![ResultRecord::fields([("test", json!("Assay")), ("status", json!("PASS"))])],
/// )];
///
/// let result = compiler.compile("assay status", &responses);
/// assert_eq!(result.citations, vec!["LIMS Agent (1 result(s))"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        info!(
            max_summary_length = config.max_summary_length,
            contradiction_detection = config.enable_contradiction_detection,
            "Compiler initialized"
        );
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile the responses gathered for `query`.
    pub fn compile(&self, query: &str, responses: &[ResponseBundle]) -> CompilationResult {
        info!(query = %query, agents = responses.len(), "Starting compilation");

        let deduplicated = deduplicate(responses);
        let prioritized = prioritize(deduplicated, query);

        let contradictions = if self.config.enable_contradiction_detection {
            detect_contradictions(
                &prioritized,
                self.config.contradiction_scope_key.as_deref(),
            )
        } else {
            Vec::new()
        };

        let summary = generate_summary(
            &prioritized,
            &contradictions,
            self.config.max_summary_length,
        );
        let citations = extract_citations(&prioritized);
        let details = prepare_details(&prioritized, &contradictions);

        let result = CompilationResult {
            summary,
            details,
            citations,
            metadata: CompilationMetadata {
                query: query.to_string(),
                agents_consulted: responses.len(),
                total_results: total_results(responses),
                contradictions_found: contradictions.len(),
            },
        };

        info!(
            summary_chars = result.summary.chars().count(),
            details = result.details.len(),
            "Compilation complete"
        );
        result
    }
}

/// Create a compiler, with default settings when no config is given.
pub fn create_compiler(config: Option<CompilerConfig>) -> Compiler {
    Compiler::new(config.unwrap_or_default())
}
