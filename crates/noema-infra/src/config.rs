//! Service configuration loader.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`ServiceConfig`], falling back to defaults when the file is missing or
//! malformed. Environment variables are applied on top.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use noema_types::config::{BackendKind, ServiceConfig};

/// Default data directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = "./cognee_data";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_service_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

/// Apply environment overrides using the process environment.
pub fn apply_env_overrides(config: ServiceConfig) -> ServiceConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup.
///
/// Unparseable values are logged and ignored.
pub fn apply_overrides<F>(mut config: ServiceConfig, lookup: F) -> ServiceConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("COGNEE_SERVICE_HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("COGNEE_SERVICE_PORT") {
        match port.parse() {
            Ok(port) => config.server.port = port,
            Err(err) => tracing::warn!("Ignoring COGNEE_SERVICE_PORT={port}: {err}"),
        }
    }
    if let Some(base_url) = lookup("COGNEE_BASE_URL") {
        config.cognee.base_url = base_url;
    }
    if let Some(timeout) = lookup("COGNEE_REQUEST_TIMEOUT_SECS") {
        match timeout.parse() {
            Ok(secs) => config.cognee.request_timeout_secs = secs,
            Err(err) => tracing::warn!("Ignoring COGNEE_REQUEST_TIMEOUT_SECS={timeout}: {err}"),
        }
    }
    if let Some(backend) = lookup("NOEMA_BACKEND") {
        match backend.parse::<BackendKind>() {
            Ok(kind) => config.backend = kind,
            Err(err) => tracing::warn!("Ignoring NOEMA_BACKEND: {err}"),
        }
    }
    config
}

/// Bearer token for the Cognee server, if configured.
pub fn cognee_api_token() -> Option<SecretString> {
    std::env::var("COGNEE_API_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
}

/// Warn when the backend's LLM key is missing; cognify and search need it.
pub fn check_llm_key() {
    if std::env::var_os("OPENAI_API_KEY").is_some() {
        tracing::info!("OPENAI_API_KEY is set for the memory backend");
    } else {
        tracing::warn!("OPENAI_API_KEY not set - memory backend operations may fail");
    }
}

/// Resolve the data directory.
///
/// Uses `NOEMA_DATA_DIR`, then `COGNEE_DATA_DIR`, then `./cognee_data`.
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_with(|key| std::env::var(key).ok())
}

fn resolve_data_dir_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let dir = lookup("NOEMA_DATA_DIR")
        .or_else(|| lookup("COGNEE_DATA_DIR"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    // Relative prefixes get lost by some backends when paths are read back.
    match std::path::absolute(&dir) {
        Ok(abs) => abs,
        Err(err) => {
            tracing::warn!("Failed to absolutize {}: {err}", dir.display());
            dir
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_service_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_service_config(tmp.path()).await;
        assert_eq!(config, ServiceConfig::default());
    }

    #[tokio::test]
    async fn load_service_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
backend = "in-process"

[server]
host = "127.0.0.1"
port = 8200
"#,
        )
        .await
        .unwrap();

        let config = load_service_config(tmp.path()).await;
        assert_eq!(config.backend, BackendKind::InProcess);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8200);
    }

    #[tokio::test]
    async fn load_service_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_service_config(tmp.path()).await;
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn apply_overrides_sets_fields() {
        let config = apply_overrides(
            ServiceConfig::default(),
            env(&[
                ("COGNEE_SERVICE_PORT", "9100"),
                ("COGNEE_BASE_URL", "http://cognee:8000"),
                ("COGNEE_REQUEST_TIMEOUT_SECS", "30"),
                ("NOEMA_BACKEND", "in-process"),
            ]),
        );

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.cognee.base_url, "http://cognee:8000");
        assert_eq!(config.cognee.request_timeout_secs, 30);
        assert_eq!(config.backend, BackendKind::InProcess);
    }

    #[test]
    fn apply_overrides_ignores_invalid_values() {
        let config = apply_overrides(
            ServiceConfig::default(),
            env(&[("COGNEE_SERVICE_PORT", "not-a-port"), ("NOEMA_BACKEND", "redis")]),
        );

        assert_eq!(config.server.port, 8100);
        assert_eq!(config.backend, BackendKind::Cognee);
    }

    #[test]
    fn resolve_data_dir_prefers_noema_variable() {
        let dir = resolve_data_dir_with(env(&[
            ("NOEMA_DATA_DIR", "/srv/noema"),
            ("COGNEE_DATA_DIR", "/srv/cognee"),
        ]));
        assert_eq!(dir, PathBuf::from("/srv/noema"));

        let dir = resolve_data_dir_with(env(&[("COGNEE_DATA_DIR", "/srv/cognee")]));
        assert_eq!(dir, PathBuf::from("/srv/cognee"));
    }

    #[test]
    fn resolve_data_dir_default_is_absolute() {
        let dir = resolve_data_dir_with(env(&[]));
        assert!(dir.is_absolute());
        assert!(dir.ends_with("cognee_data"));
    }
}
