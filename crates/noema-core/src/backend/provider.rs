//! MemoryBackend trait definition.

use noema_types::error::BackendError;
use noema_types::raw::{QueryKind, RawResult};

/// Trait for semantic memory backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in noema-infra (e.g., `CogneeHttpBackend`).
/// Implementations must be safe to call concurrently; this layer adds no
/// queuing or backpressure of its own.
pub trait MemoryBackend: Send + Sync {
    /// Human-readable backend name (e.g., "cognee", "in-process").
    fn name(&self) -> &str;

    /// Prepare the backend for use. Called once before the first operation;
    /// may be called again after a failure.
    fn initialize(&self) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Probe whether the backend is operational.
    fn health(&self) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Add text content to the backend under a dataset name.
    ///
    /// Fire-and-forget: the backend returns no identifier.
    fn ingest(
        &self,
        text: &str,
        dataset: &str,
    ) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Rebuild backend-internal representations. Idempotent; on completion
    /// every prior `ingest` is searchable.
    fn reindex(&self) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Run a query. Record order is whatever the backend returns.
    fn query(
        &self,
        kind: QueryKind,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RawResult>, BackendError>> + Send;
}
