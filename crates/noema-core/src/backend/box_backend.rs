//! BoxMemoryBackend -- object-safe dynamic dispatch wrapper for MemoryBackend.
//!
//! Same blanket-impl pattern as the other boxed ports:
//! 1. Define an object-safe `MemoryBackendDyn` trait with boxed futures
//! 2. Blanket-impl `MemoryBackendDyn` for all `T: MemoryBackend`
//! 3. `BoxMemoryBackend` wraps `Box<dyn MemoryBackendDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use noema_types::error::BackendError;
use noema_types::raw::{QueryKind, RawResult};

use super::provider::MemoryBackend;

/// Boxed, `Send` future borrowed from the backend.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`MemoryBackend`] with boxed futures.
///
/// A blanket implementation is provided for all types implementing `MemoryBackend`.
pub trait MemoryBackendDyn: Send + Sync {
    fn name(&self) -> &str;

    fn initialize_boxed(&self) -> BoxFuture<'_, Result<(), BackendError>>;

    fn health_boxed(&self) -> BoxFuture<'_, Result<(), BackendError>>;

    fn ingest_boxed<'a>(
        &'a self,
        text: &'a str,
        dataset: &'a str,
    ) -> BoxFuture<'a, Result<(), BackendError>>;

    fn reindex_boxed(&self) -> BoxFuture<'_, Result<(), BackendError>>;

    fn query_boxed<'a>(
        &'a self,
        kind: QueryKind,
        text: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawResult>, BackendError>>;
}

impl<T: MemoryBackend> MemoryBackendDyn for T {
    fn name(&self) -> &str {
        MemoryBackend::name(self)
    }

    fn initialize_boxed(&self) -> BoxFuture<'_, Result<(), BackendError>> {
        Box::pin(self.initialize())
    }

    fn health_boxed(&self) -> BoxFuture<'_, Result<(), BackendError>> {
        Box::pin(self.health())
    }

    fn ingest_boxed<'a>(
        &'a self,
        text: &'a str,
        dataset: &'a str,
    ) -> BoxFuture<'a, Result<(), BackendError>> {
        Box::pin(self.ingest(text, dataset))
    }

    fn reindex_boxed(&self) -> BoxFuture<'_, Result<(), BackendError>> {
        Box::pin(self.reindex())
    }

    fn query_boxed<'a>(
        &'a self,
        kind: QueryKind,
        text: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawResult>, BackendError>> {
        Box::pin(self.query(kind, text))
    }
}

/// Type-erased memory backend for runtime backend selection.
///
/// Since `MemoryBackend` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxMemoryBackend` provides equivalent methods that delegate to
/// the inner `MemoryBackendDyn` trait object.
pub struct BoxMemoryBackend {
    inner: Box<dyn MemoryBackendDyn + Send + Sync>,
}

impl BoxMemoryBackend {
    /// Wrap a concrete `MemoryBackend` in a type-erased box.
    pub fn new<T: MemoryBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn initialize(&self) -> Result<(), BackendError> {
        self.inner.initialize_boxed().await
    }

    pub async fn health(&self) -> Result<(), BackendError> {
        self.inner.health_boxed().await
    }

    pub async fn ingest(&self, text: &str, dataset: &str) -> Result<(), BackendError> {
        self.inner.ingest_boxed(text, dataset).await
    }

    pub async fn reindex(&self) -> Result<(), BackendError> {
        self.inner.reindex_boxed().await
    }

    pub async fn query(&self, kind: QueryKind, text: &str) -> Result<Vec<RawResult>, BackendError> {
        self.inner.query_boxed(kind, text).await
    }
}
