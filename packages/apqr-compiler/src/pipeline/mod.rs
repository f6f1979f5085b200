//! Compilation pipeline.
//!
//! Stages run strictly in order, each consuming the previous one's output:
//! - Deduplication (cross-source, content-keyed)
//! - Prioritization (keyword relevance)
//! - Contradiction detection
//! - Summary generation
//! - Citation extraction and detail assembly

pub mod citations;
pub mod compiler;
pub mod contradictions;
pub mod dedup;
pub mod prioritize;
pub mod summary;

pub use citations::{extract_citations, prepare_details};
pub use compiler::{create_compiler, Compiler};
pub use contradictions::detect_contradictions;
pub use dedup::{content_hash, content_key, deduplicate};
pub use prioritize::{prioritize, query_keywords, relevance_score, PrioritizedBundle, ScoredResult};
pub use summary::{format_result_summary, generate_summary, truncate_summary};
