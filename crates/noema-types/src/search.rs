//! Search request and response payloads.
//!
//! These form the stable client-facing contract that the result normalizer
//! produces from whatever shapes the memory backend returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Smallest accepted `topK`.
pub const MIN_TOP_K: u32 = 1;

/// Largest accepted `topK`.
pub const MAX_TOP_K: u32 = 50;

/// `topK` used when the request omits it.
pub const DEFAULT_TOP_K: u32 = 5;

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

/// Request to search the memory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Natural language search query.
    pub query: String,
    /// Number of results to return (1..=50).
    #[serde(rename = "topK", default = "default_top_k")]
    pub top_k: u32,
}

impl SearchRequest {
    /// Whether `top_k` lies inside the accepted bounds.
    pub fn top_k_in_bounds(top_k: u32) -> bool {
        (MIN_TOP_K..=MAX_TOP_K).contains(&top_k)
    }
}

/// A single normalized search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    /// Synthetic positional identifier (`result_{index}`).
    pub cognee_id: String,
    /// Evidence excerpt, at most 500 characters.
    pub snippet: String,
    /// Relevance score in `[0.0, 1.0]`.
    pub score: f64,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// An edge in the knowledge graph fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(rename = "from")]
    pub from_node: String,
    #[serde(rename = "to")]
    pub to_node: String,
    pub relation: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Graph fragment related to a search query.
///
/// Never serialized empty: the normalizer returns `None` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphContext {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphContext {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Response from a memory search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub graph_context: Option<GraphContext>,
}

impl SearchResponse {
    /// The degraded response returned when the primary search fails.
    pub fn empty() -> Self {
        Self::default()
    }
}
