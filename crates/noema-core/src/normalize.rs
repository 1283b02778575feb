//! Result normalization.
//!
//! Reconciles the backend's shape-polymorphic search records into the stable
//! client-facing contract: a bounded list of [`SearchItem`]s with clamped
//! scores and truncated snippets, plus an optional [`GraphContext`].
//!
//! Per-record extraction, applied to the first `top_k` records only:
//!
//! | shape        | snippet                                   | score                  | metadata      |
//! |--------------|-------------------------------------------|------------------------|---------------|
//! | `Mapping`    | `text`, else `content`, else whole record | `score`, else fallback | `metadata`    |
//! | `Attributes` | payload, else whole record                | `score`, else fallback | `metadata`    |
//! | `Opaque`     | the text                                  | fallback               | empty         |
//!
//! The fallback score is `1.0 - index * 0.1`. It goes negative from index 10
//! onward and is then clamped to `0.0`.
//!
//! Upstream order is kept as-is; nothing here re-sorts by score.

use std::collections::HashSet;

use serde_json::{Map, Value};

use noema_types::raw::{RawResult, display_value};
use noema_types::search::{GraphContext, GraphEdge, SearchItem, SearchResponse};

/// Maximum snippet length, in characters.
pub const MAX_SNIPPET_CHARS: usize = 500;

/// Relation used for edges that do not name one.
pub const DEFAULT_RELATION: &str = "related_to";

/// Weight used for edges that do not carry one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 0.5;

/// Positional fallback score for records without a usable score.
pub fn fallback_score(index: usize) -> f64 {
    1.0 - (index as f64) * 0.1
}

/// Clamp a score into `[0.0, 1.0]`. NaN maps to `0.0`.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Keep the first [`MAX_SNIPPET_CHARS`] characters. No ellipsis is added.
pub fn truncate_snippet(text: &str) -> String {
    match text.char_indices().nth(MAX_SNIPPET_CHARS) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Synthetic positional identifier. Not a backend handle.
pub fn result_id(index: usize) -> String {
    format!("result_{index}")
}

/// Fields pulled out of one raw record before truncation and clamping.
struct Extracted {
    snippet: String,
    score: Option<f64>,
    metadata: Map<String, Value>,
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// `metadata` of a keyed record, `{}` when absent or not an object.
fn metadata_of(map: &Map<String, Value>) -> Map<String, Value> {
    map.get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn extract(raw: &RawResult) -> Extracted {
    match raw {
        RawResult::Mapping(map) => Extracted {
            snippet: present(map, "text")
                .or_else(|| present(map, "content"))
                .map(display_value)
                .unwrap_or_else(|| raw.repr()),
            score: map.get("score").and_then(Value::as_f64),
            metadata: metadata_of(map),
        },
        RawResult::Attributes {
            payload,
            score,
            fields,
            ..
        } => Extracted {
            snippet: payload
                .as_ref()
                .filter(|v| !v.is_null())
                .map(display_value)
                .unwrap_or_else(|| raw.repr()),
            score: *score,
            metadata: metadata_of(fields),
        },
        RawResult::Opaque(text) => Extracted {
            snippet: text.clone(),
            score: None,
            metadata: Map::new(),
        },
    }
}

/// Normalize the first `top_k` snippet records into search items.
pub fn normalize_items(raw: &[RawResult], top_k: usize) -> Vec<SearchItem> {
    raw.iter()
        .take(top_k)
        .enumerate()
        .map(|(index, record)| {
            let extracted = extract(record);
            let score = extracted.score.unwrap_or_else(|| fallback_score(index));
            SearchItem {
                cognee_id: result_id(index),
                snippet: truncate_snippet(&extracted.snippet),
                score: clamp_score(score),
                metadata: extracted.metadata,
            }
        })
        .collect()
}

/// Edge from a keyed record carrying both `source` and `target`.
///
/// A missing or non-numeric `weight` becomes [`DEFAULT_EDGE_WEIGHT`].
fn edge_from(map: &Map<String, Value>) -> Option<GraphEdge> {
    let source = present(map, "source")?;
    let target = present(map, "target")?;

    Some(GraphEdge {
        from_node: display_value(source),
        to_node: display_value(target),
        relation: present(map, "relation")
            .map(display_value)
            .unwrap_or_else(|| DEFAULT_RELATION.to_string()),
        weight: Some(
            map.get("weight")
                .and_then(Value::as_f64)
                .unwrap_or(DEFAULT_EDGE_WEIGHT),
        ),
    })
}

/// Assemble a graph fragment from the first `top_k` graph records.
///
/// Returns `None` when no node and no edge was collected.
pub fn assemble_graph(raw: &[RawResult], top_k: usize) -> Option<GraphContext> {
    let mut seen = HashSet::new();
    let mut graph = GraphContext::default();

    let mut add_node = |name: String, graph: &mut GraphContext| {
        if seen.insert(name.clone()) {
            graph.nodes.push(name);
        }
    };

    for record in raw.iter().take(top_k) {
        match record {
            RawResult::Attributes {
                name: Some(name), ..
            } => add_node(name.clone(), &mut graph),
            RawResult::Mapping(map) => {
                if let Some(name) = present(map, "name") {
                    add_node(display_value(name), &mut graph);
                }
            }
            _ => {}
        }
        if let Some(edge) = record.fields().and_then(edge_from) {
            graph.edges.push(edge);
        }
    }

    if graph.is_empty() { None } else { Some(graph) }
}

/// Build the full search response from snippet records and, when the graph
/// query succeeded, graph records.
pub fn normalize(items: &[RawResult], graph: Option<&[RawResult]>, top_k: usize) -> SearchResponse {
    SearchResponse {
        items: normalize_items(items, top_k),
        graph_context: graph.and_then(|records| assemble_graph(records, top_k)),
    }
}
