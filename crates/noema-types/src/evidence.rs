//! Evidence ingestion and indexing payloads.
//!
//! Evidence is raw content captured by NOEMA (plain text, logs, OCR output,
//! transcripts) that is handed to the memory backend for indexing. Mental
//! models and experiences never pass through here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::fmt;
use std::str::FromStr;

/// Kind of content being ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Log,
    ScreenshotOcr,
    Transcript,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Text => write!(f, "text"),
            ContentType::Log => write!(f, "log"),
            ContentType::ScreenshotOcr => write!(f, "screenshot_ocr"),
            ContentType::Transcript => write!(f, "transcript"),
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ContentType::Text),
            "log" => Ok(ContentType::Log),
            "screenshot_ocr" => Ok(ContentType::ScreenshotOcr),
            "transcript" => Ok(ContentType::Transcript),
            other => Err(format!("invalid content type: '{other}'")),
        }
    }
}

/// Metadata attached to a piece of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestMetadata {
    /// Where the evidence came from (sensor, file, etc.).
    pub source: String,
    /// ISO-8601 timestamp of when the evidence was captured.
    pub timestamp: String,
    /// Free-form additional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

impl IngestMetadata {
    /// Flatten into a single map: `source`, `timestamp`, then every `extra` entry.
    ///
    /// Keys in `extra` override `source`/`timestamp` when they collide.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("source".to_string(), Value::String(self.source.clone()));
        map.insert(
            "timestamp".to_string(),
            Value::String(self.timestamp.clone()),
        );
        if let Some(extra) = &self.extra {
            for (key, value) in extra {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}

/// Request to ingest a piece of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Unique ID from NOEMA's evidence store.
    pub evidence_id: String,
    /// Raw text content to index.
    pub content: String,
    pub content_type: ContentType,
    pub metadata: IngestMetadata,
}

/// Response after ingesting evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Deterministic identifier derived from the evidence ID (`cognee_{id}`).
    ///
    /// The backend does not expose stable internal IDs at this boundary.
    pub cognee_id: String,
}

impl IngestResponse {
    /// Derive the backend-facing identifier for an evidence ID.
    pub fn for_evidence(evidence_id: &str) -> Self {
        Self {
            cognee_id: format!("cognee_{evidence_id}"),
        }
    }
}

/// Outcome of a cognify (reindex) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CognifyStatus {
    Completed,
    Error,
}

/// Response after running the backend's indexing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognifyResponse {
    pub status: CognifyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CognifyResponse {
    pub fn completed() -> Self {
        Self {
            status: CognifyStatus::Completed,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CognifyStatus::Error,
            message: Some(message.into()),
        }
    }
}

/// Service health as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// Health check response. Boolean status only, no partial-health detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    pub fn from_healthy(healthy: bool) -> Self {
        if healthy {
            Self {
                status: HealthStatus::Ok,
                message: None,
            }
        } else {
            Self {
                status: HealthStatus::Error,
                message: Some("Cognee initialization failed".to_string()),
            }
        }
    }
}
