//! Configuration types for the compiler.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CompilerError, Result};

/// Default character budget for the compiled summary.
pub const DEFAULT_MAX_SUMMARY_LENGTH: usize = 500;

/// Construction-time settings for a [`Compiler`](crate::Compiler).
///
/// Read-only once the compiler is built, so one instance can serve
/// concurrent `compile` calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Character budget for the summary, ellipsis included.
    ///
    /// Default: 500.
    pub max_summary_length: usize,

    /// Run the contradiction detection stage.
    ///
    /// Default: true.
    pub enable_contradiction_detection: bool,

    /// Only compare field values between results sharing this key's value.
    ///
    /// When `None`, any two results reporting the same field name with
    /// different values contradict each other, even if they describe
    /// unrelated records (a `status` of "PASS" on a test result vs "Released"
    /// on a batch). Setting this to e.g. `"lot_number"` scopes comparison to
    /// the same lot. Results lacking the key are not compared.
    ///
    /// Default: None.
    pub contradiction_scope_key: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_summary_length: DEFAULT_MAX_SUMMARY_LENGTH,
            enable_contradiction_detection: true,
            contradiction_scope_key: None,
        }
    }
}

impl CompilerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from an options object.
    ///
    /// Unknown keys are ignored. A known key with the wrong type fails.
    pub fn from_value(options: &Value) -> Result<Self> {
        if !options.is_object() {
            return Err(CompilerError::Config {
                reason: format!("expected an options object, got {}", json_kind(options)),
            });
        }
        serde_json::from_value(options.clone()).map_err(|e| CompilerError::Config {
            reason: e.to_string(),
        })
    }

    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Set the summary character budget.
    pub fn with_max_summary_length(mut self, max: usize) -> Self {
        self.max_summary_length = max;
        self
    }

    /// Enable or disable contradiction detection.
    pub fn with_contradiction_detection(mut self, enabled: bool) -> Self {
        self.enable_contradiction_detection = enabled;
        self
    }

    /// Scope contradiction comparison to results sharing this key.
    pub fn with_contradiction_scope(mut self, key: impl Into<String>) -> Self {
        self.contradiction_scope_key = Some(key.into());
        self
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
