//! Cognee REST API request/response types.

use serde::Serialize;
use serde_json::Value;

use noema_types::raw::{QueryKind, RawResult};

/// Cognee search type used for each query kind.
pub fn search_type(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Snippets => "INSIGHTS",
        QueryKind::Graph => "GRAPH_COMPLETION",
    }
}

/// Body of `POST /api/v1/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CogneeSearchRequest<'a> {
    pub search_type: &'static str,
    pub query: &'a str,
}

/// Body of `POST /api/v1/cognify`. Empty means "all datasets".
#[derive(Debug, Default, Serialize)]
pub struct CogneeCognifyRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<String>,
}

/// Turn a search response body into raw records.
///
/// An array yields one record per element, `null` yields none, and any other
/// value is treated as a single record.
pub fn parse_search_body(body: Value) -> Vec<RawResult> {
    match body {
        Value::Array(records) => records.into_iter().map(RawResult::from_value).collect(),
        Value::Null => Vec::new(),
        other => vec![RawResult::from_value(other)],
    }
}
