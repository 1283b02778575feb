//! Application state wiring the memory service together.
//!
//! AppState holds the concrete service instance used by both CLI commands
//! and REST API handlers. The backend is chosen at startup from
//! configuration and injected into the service.

use std::path::PathBuf;
use std::sync::Arc;

use noema_core::backend::BoxMemoryBackend;
use noema_core::service::MemoryService;
use noema_infra::cognee::CogneeHttpBackend;
use noema_infra::config::{
    apply_env_overrides, check_llm_key, cognee_api_token, load_service_config, resolve_data_dir,
};
use noema_infra::in_process::InProcessBackend;
use noema_types::config::{BackendKind, ServiceConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub memory: Arc<MemoryService>,
    pub config: Arc<ServiceConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve config, build the backend.
    ///
    /// `backend_override` (from the CLI) takes precedence over config and env.
    pub async fn init(backend_override: Option<BackendKind>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = apply_env_overrides(load_service_config(&data_dir).await);
        if let Some(kind) = backend_override {
            config.backend = kind;
        }

        check_llm_key();
        let backend = build_backend(&config)?;
        tracing::info!(
            backend = backend.name(),
            data_dir = %data_dir.display(),
            "memory service configured"
        );

        Ok(Self::from_parts(backend, config, data_dir))
    }

    /// Assemble state from an already-built backend.
    pub fn from_parts(backend: BoxMemoryBackend, config: ServiceConfig, data_dir: PathBuf) -> Self {
        Self {
            memory: Arc::new(MemoryService::new(backend)),
            config: Arc::new(config),
            data_dir,
        }
    }
}

/// Build the configured backend adapter.
fn build_backend(config: &ServiceConfig) -> anyhow::Result<BoxMemoryBackend> {
    let backend = match config.backend {
        BackendKind::Cognee => {
            BoxMemoryBackend::new(CogneeHttpBackend::new(&config.cognee, cognee_api_token())?)
        }
        BackendKind::InProcess => BoxMemoryBackend::new(InProcessBackend::new()),
    };
    Ok(backend)
}
