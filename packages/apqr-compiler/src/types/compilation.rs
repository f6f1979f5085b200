//! Compilation output types.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::response::ResultRecord;

/// Attribution used for details the compiler produces itself.
pub const COMPILER_SOURCE: &str = "Compiler";

/// The result of a compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationResult {
    /// Human-readable synthesis, never longer than the configured budget
    pub summary: String,

    /// Every retained result in priority order, plus at most one trailing
    /// contradiction report
    pub details: Vec<Detail>,

    /// One entry per source that contributed at least one result
    pub citations: Vec<String>,

    pub metadata: CompilationMetadata,
}

impl CompilationResult {
    /// Check if any contradictions were detected.
    pub fn has_contradictions(&self) -> bool {
        self.metadata.contradictions_found > 0
    }

    /// The contradiction report, if one was appended to the details.
    pub fn contradictions(&self) -> &[Contradiction] {
        self.details
            .last()
            .and_then(|d| match &d.content {
                DetailContent::Contradictions(report) => Some(report.items.as_slice()),
                DetailContent::Result(_) => None,
            })
            .unwrap_or(&[])
    }

    /// Details that carry a source result (excludes the contradiction report).
    pub fn result_details(&self) -> impl Iterator<Item = &Detail> {
        self.details
            .iter()
            .filter(|d| matches!(d.content, DetailContent::Result(_)))
    }
}

/// Audit information about a compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationMetadata {
    /// The query as supplied
    pub query: String,

    /// Number of input bundles, empty ones included
    pub agents_consulted: usize,

    /// Results across the input bundles before deduplication
    pub total_results: usize,

    pub contradictions_found: usize,
}

/// One entry of the detailed results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    /// Source the content is attributed to
    pub source_agent: String,

    pub content: DetailContent,

    /// Query relevance in `[0.0, 1.0]`
    pub relevance_score: f64,
}

impl<'de> Deserialize<'de> for Detail {
    /// Only details attributed to [`COMPILER_SOURCE`] are read as a
    /// contradiction report. A source result shaped like a report stays a
    /// result.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawDetail {
            source_agent: String,
            content: Value,
            relevance_score: f64,
        }

        let raw = RawDetail::deserialize(deserializer)?;
        let report = if raw.source_agent == COMPILER_SOURCE {
            serde_json::from_value::<ContradictionReport>(raw.content.clone()).ok()
        } else {
            None
        };
        let content = match report {
            Some(report) => DetailContent::Contradictions(report),
            None => DetailContent::Result(
                ResultRecord::try_from(raw.content).map_err(de::Error::custom)?,
            ),
        };

        Ok(Self {
            source_agent: raw.source_agent,
            content,
            relevance_score: raw.relevance_score,
        })
    }
}

/// Payload of a detail entry.
///
/// Serialized without a wrapper; [`Detail`] picks the variant back from its
/// `source_agent` when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailContent {
    /// Contradictions found across sources
    Contradictions(ContradictionReport),

    /// A retained source result
    Result(ResultRecord),
}

/// Every contradiction of a compilation, serialized as
/// `{"type": "contradictions", "items": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "contradictions")]
pub struct ContradictionReport {
    pub items: Vec<Contradiction>,
}

/// A field reported with differing values.
///
/// The compiler doesn't resolve contradictions - it exposes them for the
/// reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradiction {
    /// Field name the sources disagree on
    pub field: String,

    /// Every value observed for the field, in priority order
    pub conflicting_values: Vec<ObservedValue>,

    pub severity: Severity,

    /// Value of the scope key shared by the compared results, when
    /// comparison was scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Contradiction {
    /// Create a new contradiction for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            conflicting_values: Vec::new(),
            severity: Severity::Medium,
            scope: None,
        }
    }

    /// Add an observed value.
    pub fn with_value(mut self, agent: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conflicting_values.push(ObservedValue {
            agent: agent.into(),
            value: value.into(),
        });
        self
    }

    /// Sources that reported this field, in order, without repeats.
    pub fn agents(&self) -> Vec<&str> {
        let mut agents: Vec<&str> = Vec::new();
        for observed in &self.conflicting_values {
            if !agents.contains(&observed.agent.as_str()) {
                agents.push(&observed.agent);
            }
        }
        agents
    }
}

/// A value one source reported for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedValue {
    pub agent: String,
    pub value: Value,
}

/// How urgently a contradiction needs review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    /// Field-collision contradictions are always reported at this level.
    #[default]
    Medium,
    High,
}
