//! Memory service.
//!
//! `MemoryService` is the single entry point used by the HTTP handlers and
//! the CLI. It owns an explicitly injected backend (no process-wide
//! singleton), initializes it lazily and at most once, and applies the
//! failure policy of each operation:
//!
//! - ingest fails loudly (evidence must never be silently dropped)
//! - cognify reports `error` in its response body
//! - search degrades to an empty result, graph failures to `graph_context: null`
//! - health is a plain boolean

use tokio::sync::Mutex;

use noema_types::error::{BackendError, MemoryError};
use noema_types::evidence::{CognifyResponse, IngestRequest, IngestResponse};
use noema_types::raw::QueryKind;
use noema_types::search::{MAX_TOP_K, MIN_TOP_K, SearchRequest, SearchResponse};

use crate::backend::BoxMemoryBackend;
use crate::normalize;

/// Service wrapping a memory backend with NOEMA's evidence semantics.
pub struct MemoryService {
    backend: BoxMemoryBackend,
    initialized: Mutex<bool>,
}

impl MemoryService {
    /// Create a new service over the given backend. Nothing is contacted yet.
    pub fn new(backend: BoxMemoryBackend) -> Self {
        Self {
            backend,
            initialized: Mutex::new(false),
        }
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Initialize the backend once. Safe to call repeatedly and concurrently;
    /// a failed attempt is retried on the next call.
    pub async fn initialize(&self) -> Result<(), BackendError> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return Ok(());
        }

        self.backend.initialize().await?;
        *initialized = true;
        tracing::info!(backend = self.backend.name(), "memory backend initialized");
        Ok(())
    }

    /// Ingest a piece of evidence.
    ///
    /// The content is prefixed with its type and source so the backend has
    /// that context at retrieval time, and stored in the dataset
    /// `evidence_{evidence_id}`. The returned identifier is derived from the
    /// evidence ID; the backend exposes none of its own.
    pub async fn ingest_evidence(
        &self,
        request: &IngestRequest,
    ) -> Result<IngestResponse, MemoryError> {
        // A blank ID would collapse distinct evidence into the dataset `evidence_`.
        if request.evidence_id.trim().is_empty() {
            return Err(MemoryError::Validation(
                "evidence_id must not be empty".to_string(),
            ));
        }

        self.initialize().await.map_err(MemoryError::Ingest)?;

        let metadata = request.metadata.to_map();
        let source = metadata
            .get("source")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        let enriched = enrich_content(&request.content_type.to_string(), source, &request.content);
        let dataset = dataset_name(&request.evidence_id);

        self.backend
            .ingest(&enriched, &dataset)
            .await
            .map_err(|e| {
                tracing::error!(evidence_id = %request.evidence_id, error = %e, "ingest failed");
                MemoryError::Ingest(e)
            })?;

        let response = IngestResponse::for_evidence(&request.evidence_id);
        tracing::info!(
            evidence_id = %request.evidence_id,
            cognee_id = %response.cognee_id,
            content_type = %request.content_type,
            "ingested evidence"
        );
        Ok(response)
    }

    /// Rebuild the backend's representations so all prior ingests are searchable.
    pub async fn reindex_all(&self) -> CognifyResponse {
        if let Err(e) = self.initialize().await {
            tracing::error!(error = %e, "cognify failed");
            return CognifyResponse::error(e.to_string());
        }

        tracing::info!("running cognify");
        match self.backend.reindex().await {
            Ok(()) => {
                tracing::info!("cognify completed");
                CognifyResponse::completed()
            }
            Err(e) => {
                tracing::error!(error = %e, "cognify failed");
                CognifyResponse::error(e.to_string())
            }
        }
    }

    /// Search the backend for evidence snippets and related graph context.
    ///
    /// Only an out-of-range `top_k` is an error. Backend failures degrade:
    /// a failed snippet query yields an empty response, a failed graph query
    /// yields `graph_context: None` alongside the items.
    pub async fn search(&self, query: &str, top_k: u32) -> Result<SearchResponse, MemoryError> {
        if !SearchRequest::top_k_in_bounds(top_k) {
            return Err(MemoryError::Validation(format!(
                "topK must be between {MIN_TOP_K} and {MAX_TOP_K}, got {top_k}"
            )));
        }

        tracing::info!(query, top_k, "searching memory");

        if let Err(e) = self.initialize().await {
            tracing::error!(error = %e, "search failed");
            return Ok(SearchResponse::empty());
        }

        let (snippets, graph) = tokio::join!(
            self.backend.query(QueryKind::Snippets, query),
            self.backend.query(QueryKind::Graph, query),
        );

        let snippets = match snippets {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "search failed");
                return Ok(SearchResponse::empty());
            }
        };

        let graph = match graph {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!(error = %e, "graph search failed (non-fatal)");
                None
            }
        };

        let response = normalize::normalize(&snippets, graph.as_deref(), top_k as usize);
        tracing::info!(
            query,
            results = response.items.len(),
            has_graph = response.graph_context.is_some(),
            "search completed"
        );
        Ok(response)
    }

    /// Whether the backend is operational.
    pub async fn health_check(&self) -> bool {
        let result = match self.initialize().await {
            Ok(()) => self.backend.health().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "health check failed");
                false
            }
        }
    }
}

/// Prefix content with its type and source for better retrieval context.
pub fn enrich_content(content_type: &str, source: &str, content: &str) -> String {
    format!("[{content_type}] [source: {source}]\n{content}")
}

/// Backend dataset that holds one piece of evidence.
pub fn dataset_name(evidence_id: &str) -> String {
    format!("evidence_{evidence_id}")
}
