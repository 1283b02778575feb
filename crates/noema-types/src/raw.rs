//! Raw records returned by the memory backend's query capability.
//!
//! The backend emits records in several shapes with no enforced contract.
//! [`RawResult`] captures the three shapes this layer understands, and
//! [`RawResult::from_value`] is the single place where a JSON record is
//! classified into one of them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::fmt;

/// Which backend query to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Evidence snippets with relevance scores.
    Snippets,
    /// Graph-oriented records (nodes and relations).
    Graph,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Snippets => write!(f, "snippets"),
            QueryKind::Graph => write!(f, "graph"),
        }
    }
}

/// A single backend record, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    /// String-keyed mapping (`text`/`content`, `score`, `metadata`, `name`,
    /// `source`/`target`, ...).
    Mapping(Map<String, Value>),
    /// Typed record exposing a payload-like field and optional score/name.
    Attributes {
        payload: Option<Value>,
        score: Option<f64>,
        name: Option<String>,
        /// Every field of the record, including `metadata` and edge endpoints.
        fields: Map<String, Value>,
    },
    /// Anything else. Only its textual form is derivable.
    Opaque(String),
}

impl RawResult {
    /// Classify a JSON record.
    ///
    /// - object with `payload` and neither `text` nor `content` -> `Attributes`
    /// - any other object -> `Mapping`
    /// - anything else -> `Opaque` with the value's string form
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map)
                if map.contains_key("payload")
                    && !map.contains_key("text")
                    && !map.contains_key("content") =>
            {
                RawResult::Attributes {
                    payload: map.get("payload").cloned(),
                    score: map.get("score").and_then(Value::as_f64),
                    name: map.get("name").filter(|v| !v.is_null()).map(display_value),
                    fields: map,
                }
            }
            Value::Object(map) => RawResult::Mapping(map),
            other => RawResult::Opaque(display_value(&other)),
        }
    }

    /// Textual form of the whole record.
    pub fn repr(&self) -> String {
        match self {
            RawResult::Mapping(map) | RawResult::Attributes { fields: map, .. } => {
                Value::Object(map.clone()).to_string()
            }
            RawResult::Opaque(text) => text.clone(),
        }
    }

    /// Keyed fields of the record. `None` for opaque records.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            RawResult::Mapping(map) | RawResult::Attributes { fields: map, .. } => Some(map),
            RawResult::Opaque(_) => None,
        }
    }
}

impl From<Value> for RawResult {
    fn from(value: Value) -> Self {
        RawResult::from_value(value)
    }
}

/// String form of a JSON value: strings verbatim, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
