//! In-process memory backend.
//!
//! Keeps evidence in memory and answers queries by plain term overlap. It has
//! none of a real backend's semantics (no embeddings, no extracted entities)
//! but follows the same lifecycle: `ingest` stages content, and only
//! `reindex` makes staged content searchable. Useful for running the service
//! without a Cognee server and for exercising the HTTP surface in tests.

use std::collections::BTreeSet;

use serde_json::json;
use tokio::sync::RwLock;

use noema_core::backend::MemoryBackend;
use noema_types::error::BackendError;
use noema_types::raw::{QueryKind, RawResult};

/// Relation emitted for dataset -> term edges.
const MENTIONS: &str = "mentions";

#[derive(Debug, Clone)]
struct Document {
    dataset: String,
    text: String,
    terms: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct Index {
    staged: Vec<Document>,
    searchable: Vec<Document>,
}

/// Memory backend that lives entirely inside the service process.
#[derive(Debug, Default)]
pub struct InProcessBackend {
    index: RwLock<Index>,
}

impl InProcessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents visible to queries.
    pub async fn searchable_len(&self) -> usize {
        self.index.read().await.searchable.len()
    }
}

/// Lowercased alphanumeric terms of a text.
fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl MemoryBackend for InProcessBackend {
    fn name(&self) -> &str {
        "in-process"
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn health(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn ingest(&self, text: &str, dataset: &str) -> Result<(), BackendError> {
        let document = Document {
            dataset: dataset.to_string(),
            text: text.to_string(),
            terms: terms(text),
        };
        self.index.write().await.staged.push(document);
        Ok(())
    }

    async fn reindex(&self) -> Result<(), BackendError> {
        let mut index = self.index.write().await;
        let staged = std::mem::take(&mut index.staged);
        let added = staged.len();
        index.searchable.extend(staged);
        tracing::debug!(added, total = index.searchable.len(), "in-process index rebuilt");
        Ok(())
    }

    async fn query(&self, kind: QueryKind, text: &str) -> Result<Vec<RawResult>, BackendError> {
        let query_terms = terms(text);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let index = self.index.read().await;
        let mut matches: Vec<(&Document, Vec<&String>)> = index
            .searchable
            .iter()
            .map(|doc| {
                let shared: Vec<&String> = query_terms.intersection(&doc.terms).collect();
                (doc, shared)
            })
            .filter(|(_, shared)| !shared.is_empty())
            .collect();
        // Stable: equal scores keep ingestion order.
        matches.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let records = match kind {
            QueryKind::Snippets => matches
                .iter()
                .map(|(doc, shared)| {
                    let score = shared.len() as f64 / query_terms.len() as f64;
                    RawResult::from_value(json!({
                        "text": doc.text,
                        "score": score,
                        "metadata": {"dataset": doc.dataset},
                    }))
                })
                .collect(),
            QueryKind::Graph => {
                let mut records = Vec::new();
                for (doc, shared) in &matches {
                    records.push(RawResult::from_value(json!({"name": doc.dataset})));
                    for term in shared {
                        records.push(RawResult::from_value(json!({
                            "name": term,
                            "source": doc.dataset,
                            "target": term,
                            "relation": MENTIONS,
                        })));
                    }
                }
                records
            }
        };

        Ok(records)
    }
}
