//! Boundary parsing of untyped compile requests.
//!
//! Upstream collaborators hand over JSON. Everything is validated here so
//! the pipeline only ever sees well-formed bundles; errors name the bundle
//! and result index at fault.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CompilerError, Result};
use crate::types::config::json_kind;
use crate::types::response::{ResponseBundle, ResultRecord};

/// A query plus the bundles gathered for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileRequest {
    pub query: String,
    pub responses: Vec<ResponseBundle>,
}

impl CompileRequest {
    pub fn new(query: impl Into<String>, responses: Vec<ResponseBundle>) -> Self {
        Self {
            query: query.into(),
            responses,
        }
    }

    /// Parse and validate a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Validate a request object of the form `{"query": ..., "responses": [...]}`.
    ///
    /// A missing `responses` key is an empty list.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| CompilerError::InvalidQuery {
            reason: format!("expected a request object, got {}", json_kind(value)),
        })?;

        let query = match object.get("query") {
            Some(Value::String(query)) => query.clone(),
            Some(other) => {
                return Err(CompilerError::InvalidQuery {
                    reason: format!("expected a string, got {}", json_kind(other)),
                })
            }
            None => {
                return Err(CompilerError::InvalidQuery {
                    reason: "missing `query`".to_string(),
                })
            }
        };

        let responses = match object.get("responses") {
            Some(responses) => parse_responses(responses)?,
            None => Vec::new(),
        };

        Ok(Self { query, responses })
    }
}

/// Validate a list of response bundles.
pub fn parse_responses(value: &Value) -> Result<Vec<ResponseBundle>> {
    let Value::Array(items) = value else {
        return Err(CompilerError::bundle(
            0,
            format!("expected a list of response bundles, got {}", json_kind(value)),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_bundle(index, item))
        .collect()
}

/// Validate one response bundle.
///
/// The source name is read from `source_name`, falling back to `agent`.
pub fn parse_bundle(index: usize, value: &Value) -> Result<ResponseBundle> {
    let object = value.as_object().ok_or_else(|| {
        CompilerError::bundle(index, format!("expected an object, got {}", json_kind(value)))
    })?;

    let source_name = match object.get("source_name").or_else(|| object.get("agent")) {
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            return Err(CompilerError::bundle(
                index,
                format!("source name must be a string, got {}", json_kind(other)),
            ))
        }
        None => return Err(CompilerError::bundle(index, "missing `source_name`")),
    };

    let results = match object.get("results") {
        Some(Value::Array(results)) => results,
        Some(other) => {
            return Err(CompilerError::bundle(
                index,
                format!("`results` must be a list, got {}", json_kind(other)),
            ))
        }
        None => return Err(CompilerError::bundle(index, "missing `results`")),
    };

    let results = results
        .iter()
        .enumerate()
        .map(|(i, result)| parse_result(index, i, result))
        .collect::<Result<Vec<_>>>()?;

    Ok(ResponseBundle::new(source_name, results))
}

/// Validate one result: a field mapping or a string, number or boolean.
pub fn parse_result(bundle: usize, index: usize, value: &Value) -> Result<ResultRecord> {
    ResultRecord::try_from(value.clone())
        .map_err(|reason| CompilerError::result(bundle, index, reason))
}
