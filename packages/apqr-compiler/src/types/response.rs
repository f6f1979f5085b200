//! Response bundles - the input of a compilation.

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::config::json_kind;

/// Fields that carry no substantive content and are ignored when keying a
/// result for deduplication.
pub const RESERVED_FIELDS: [&str; 3] = ["timestamp", "id", "metadata"];

/// One fact returned by a source: a COA test result, a batch yield record,
/// a document reference.
///
/// There is no schema. Field order is preserved as supplied, since the
/// first-field summary fallback and contradiction ordering depend on it.
/// Deserializing applies the same checks as [`TryFrom<Value>`], so arrays
/// and `null` are rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultRecord {
    /// A field mapping (the normal case)
    Fields(IndexMap<String, Value>),

    /// A bare string, number or boolean
    Scalar(Value),
}

impl ResultRecord {
    /// Build a field mapping from `(name, value)` pairs.
    pub fn fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a scalar result.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    /// The field mapping, if this is one.
    pub fn as_fields(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Fields(fields) => Some(fields),
            Self::Scalar(_) => None,
        }
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_fields().and_then(|f| f.get(field))
    }

    /// Lower-cased words of every field value (or of the scalar itself).
    pub fn flattened_text(&self) -> String {
        let raw = match self {
            Self::Fields(fields) => fields
                .values()
                .map(|v| display_value(v).to_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Scalar(value) => display_value(value).to_lowercase(),
        };
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl TryFrom<Value> for ResultRecord {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::Fields(fields.into_iter().collect())),
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(Self::Scalar(value)),
            Value::Array(_) | Value::Null => {
                Err(format!("{} cannot be content-keyed", json_kind(&value)))
            }
        }
    }
}

impl<'de> Deserialize<'de> for ResultRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(de::Error::custom)
    }
}

/// One source's contribution to a compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBundle {
    /// Source identifier, e.g. "LIMS", "ERP", "DMS"
    #[serde(alias = "agent")]
    pub source_name: String,

    /// Results in the order the source returned them
    pub results: Vec<ResultRecord>,
}

impl ResponseBundle {
    /// Create a bundle.
    pub fn new(source_name: impl Into<String>, results: Vec<ResultRecord>) -> Self {
        Self {
            source_name: source_name.into(),
            results,
        }
    }

    /// Create a bundle with no results.
    pub fn empty(source_name: impl Into<String>) -> Self {
        Self::new(source_name, Vec::new())
    }

    /// Append a result.
    pub fn with_result(mut self, result: ResultRecord) -> Self {
        self.results.push(result);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

/// String form of a field value.
///
/// Strings render without quotes; everything else renders as compact JSON
/// (`98.5`, `true`, `null`, `{"a":1}`). Content keys, flattened text,
/// one-line summaries and contradiction comparison all go through this.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
