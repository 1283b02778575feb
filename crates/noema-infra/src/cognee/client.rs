//! CogneeHttpBackend -- concrete [`MemoryBackend`] implementation for a Cognee server.
//!
//! Sends requests to the Cognee REST API (`/api/v1/add`, `/api/v1/cognify`,
//! `/api/v1/search`) and probes `/health`. Search responses are handed back
//! as raw records; shaping them is the normalizer's job.
//!
//! The optional API token is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};

use noema_core::backend::MemoryBackend;
use noema_types::config::CogneeConfig;
use noema_types::error::BackendError;
use noema_types::raw::{QueryKind, RawResult};

use super::types::{CogneeCognifyRequest, CogneeSearchRequest, parse_search_body, search_type};

/// Memory backend talking to a Cognee REST server.
pub struct CogneeHttpBackend {
    client: reqwest::Client,
    api_token: Option<SecretString>,
    base_url: String,
}

impl CogneeHttpBackend {
    /// Create a new backend from connection settings.
    pub fn new(config: &CogneeConfig, api_token: Option<SecretString>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BackendError::NotInitialized(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Send a request and turn transport failures and non-2xx statuses into errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                502..=504 => BackendError::Unavailable,
                code => BackendError::Status { status: code, body },
            });
        }

        Ok(response)
    }
}

impl MemoryBackend for CogneeHttpBackend {
    fn name(&self) -> &str {
        "cognee"
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        reqwest::Url::parse(&self.base_url).map_err(|e| {
            BackendError::NotInitialized(format!("invalid Cognee base URL '{}': {e}", self.base_url))
        })?;

        if self.api_token.is_none() {
            tracing::debug!("No COGNEE_API_TOKEN configured, sending unauthenticated requests");
        }
        tracing::info!(base_url = %self.base_url, "Cognee backend configured");
        Ok(())
    }

    async fn health(&self) -> Result<(), BackendError> {
        self.send(self.client.get(self.url("/health"))).await?;
        Ok(())
    }

    async fn ingest(&self, text: &str, dataset: &str) -> Result<(), BackendError> {
        let part = Part::text(text.to_string())
            .file_name(format!("{dataset}.txt"))
            .mime_str("text/plain")
            .map_err(|e| BackendError::Http(e.to_string()))?;
        let form = Form::new()
            .part("data", part)
            .text("datasetName", dataset.to_string());

        self.send(self.client.post(self.url("/api/v1/add")).multipart(form))
            .await?;
        tracing::debug!(dataset, "added content to Cognee");
        Ok(())
    }

    async fn reindex(&self) -> Result<(), BackendError> {
        self.send(
            self.client
                .post(self.url("/api/v1/cognify"))
                .json(&CogneeCognifyRequest::default()),
        )
        .await?;
        Ok(())
    }

    async fn query(&self, kind: QueryKind, text: &str) -> Result<Vec<RawResult>, BackendError> {
        let body = CogneeSearchRequest {
            search_type: search_type(kind),
            query: text,
        };

        let response = self
            .send(self.client.post(self.url("/api/v1/search")).json(&body))
            .await?;

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        let records = parse_search_body(value);
        tracing::debug!(kind = %kind, records = records.len(), "Cognee search returned");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use serde_json::{Value, json};

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn backend(base_url: String, token: Option<&str>) -> CogneeHttpBackend {
        let config = CogneeConfig {
            base_url,
            request_timeout_secs: 5,
        };
        CogneeHttpBackend::new(&config, token.map(|t| SecretString::from(t.to_string()))).unwrap()
    }

    #[tokio::test]
    async fn test_query_sends_search_type_and_classifies_records() {
        let router = Router::new().route(
            "/api/v1/search",
            post(|Json(body): Json<Value>| async move {
                match body["searchType"].as_str() {
                    Some("INSIGHTS") => Json(json!([
                        {"text": format!("match for {}", body["query"].as_str().unwrap_or_default()), "score": 0.8},
                        {"payload": {"text": "point"}}
                    ])),
                    _ => Json(json!([{"name": "disk"}])),
                }
            }),
        );
        let base_url = spawn_server(router).await;
        let backend = backend(base_url, None);

        let snippets = backend.query(QueryKind::Snippets, "disk").await.unwrap();
        assert_eq!(snippets.len(), 2);
        match &snippets[0] {
            RawResult::Mapping(map) => assert_eq!(map["text"], "match for disk"),
            other => panic!("expected Mapping, got {other:?}"),
        }
        assert!(matches!(snippets[1], RawResult::Attributes { .. }));

        let graph = backend.query(QueryKind::Graph, "disk").await.unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_posts_multipart_with_dataset() {
        let received = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = received.clone();
        let router = Router::new().route(
            "/api/v1/add",
            post(move |body: String| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(json!({"status": "ok"}))
                }
            }),
        );
        let base_url = spawn_server(router).await;

        backend(base_url, None)
            .ingest("[log] [source: syslog]\ndisk full", "evidence_7")
            .await
            .unwrap();

        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("evidence_7"));
        assert!(bodies[0].contains("disk full"));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let router = Router::new().route(
            "/health",
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer s3cret") => StatusCode::OK,
                    _ => StatusCode::UNAUTHORIZED,
                }
            }),
        );
        let base_url = spawn_server(router).await;

        assert!(backend(base_url.clone(), Some("s3cret")).health().await.is_ok());
        let err = backend(base_url, None).health().await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_reindex_error_status_carries_body() {
        let router = Router::new().route(
            "/api/v1/cognify",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "LLM API key is not set") }),
        );
        let base_url = spawn_server(router).await;

        let err = backend(base_url, None).reindex().await.unwrap_err();
        match err {
            BackendError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("LLM API key"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let backend = backend("http://127.0.0.1:1".to_string(), None);
        let err = backend.query(QueryKind::Snippets, "q").await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }

    #[tokio::test]
    async fn test_initialize_rejects_invalid_base_url() {
        let backend = backend("not a url".to_string(), None);
        assert!(matches!(
            backend.initialize().await,
            Err(BackendError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = backend("http://cognee:8000/".to_string(), None);
        assert_eq!(backend.base_url(), "http://cognee:8000");
        assert_eq!(backend.url("/health"), "http://cognee:8000/health");
    }
}
