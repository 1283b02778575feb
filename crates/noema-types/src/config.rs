//! Service configuration types.
//!
//! `ServiceConfig` mirrors the optional `config.toml` in the data directory.
//! Every field has a default so an empty or missing file is valid; the
//! environment overrides whatever the file sets.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Top-level configuration for the memory service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Which memory backend adapter to use.
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default)]
    pub cognee: CogneeConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Connection settings for a Cognee REST server.
///
/// The API token is not part of the file; it is read from
/// `COGNEE_API_TOKEN` and kept out of any serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CogneeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Cognify runs can take minutes.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    300
}

impl Default for CogneeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Available memory backend adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Remote Cognee REST server.
    #[default]
    Cognee,
    /// In-memory backend for local development and tests.
    InProcess,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cognee => write!(f, "cognee"),
            BackendKind::InProcess => write!(f, "in-process"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cognee" => Ok(BackendKind::Cognee),
            "in-process" | "in_process" | "inprocess" => Ok(BackendKind::InProcess),
            other => Err(format!("invalid backend: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8100);
        assert_eq!(config.backend, BackendKind::Cognee);
        assert_eq!(config.cognee.base_url, "http://localhost:8000");
        assert_eq!(config.cognee.request_timeout_secs, 300);
    }

    #[test]
    fn test_service_config_deserialize_empty() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_service_config_deserialize_with_values() {
        let toml_str = r#"
backend = "in-process"

[server]
port = 9000

[cognee]
base_url = "http://cognee.internal:8000"
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend, BackendKind::InProcess);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cognee.base_url, "http://cognee.internal:8000");
        assert_eq!(config.cognee.request_timeout_secs, 300);
    }

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("Cognee".parse::<BackendKind>().unwrap(), BackendKind::Cognee);
        assert_eq!(
            "in_process".parse::<BackendKind>().unwrap(),
            BackendKind::InProcess
        );
        assert!("redis".parse::<BackendKind>().is_err());
    }
}
