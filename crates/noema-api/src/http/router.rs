//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin, for local development), request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ingest", post(handlers::evidence::ingest_evidence))
        .route("/cognify", post(handlers::evidence::run_cognify))
        .route("/search", post(handlers::search::search_memory))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use noema_core::backend::{BoxMemoryBackend, MemoryBackend};
    use noema_infra::in_process::InProcessBackend;
    use noema_types::config::ServiceConfig;
    use noema_types::error::BackendError;
    use noema_types::raw::{QueryKind, RawResult};

    /// Backend that fails every operation, as if the server were down.
    struct DownBackend;

    impl MemoryBackend for DownBackend {
        fn name(&self) -> &str {
            "down"
        }

        async fn initialize(&self) -> Result<(), BackendError> {
            Ok(())
        }

        async fn health(&self) -> Result<(), BackendError> {
            Err(BackendError::Unavailable)
        }

        async fn ingest(&self, _text: &str, _dataset: &str) -> Result<(), BackendError> {
            Err(BackendError::Http("connection refused".to_string()))
        }

        async fn reindex(&self) -> Result<(), BackendError> {
            Err(BackendError::Unavailable)
        }

        async fn query(&self, _kind: QueryKind, _text: &str) -> Result<Vec<RawResult>, BackendError> {
            Err(BackendError::Unavailable)
        }
    }

    fn router_with<T: MemoryBackend + 'static>(backend: T) -> Router {
        let state = AppState::from_parts(
            BoxMemoryBackend::new(backend),
            ServiceConfig::default(),
            PathBuf::from("/tmp/noema-test"),
        );
        build_router(state)
    }

    async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn evidence(id: &str, content: &str) -> Value {
        json!({
            "evidence_id": id,
            "content": content,
            "content_type": "log",
            "metadata": {"source": "syslog", "timestamp": "2024-05-01T12:00:00Z"}
        })
    }

    #[tokio::test]
    async fn test_health_ok() {
        let router = router_with(InProcessBackend::new());
        let (status, body) = call(&router, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_health_reports_error_when_backend_down() {
        let router = router_with(DownBackend);
        let (status, body) = call(&router, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_ingest_cognify_search_round() {
        let router = router_with(InProcessBackend::new());

        let (status, body) = call(
            &router,
            "POST",
            "/ingest",
            Some(evidence("ev-1", "disk full on sda1")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"cognee_id": "cognee_ev-1"}));

        let (status, body) = call(&router, "POST", "/cognify", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "completed"}));

        let (status, body) = call(
            &router,
            "POST",
            "/search",
            Some(json!({"query": "disk", "topK": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["cognee_id"], "result_0");
        assert_eq!(items[0]["snippet"], "[log] [source: syslog]\ndisk full on sda1");
        assert_eq!(items[0]["metadata"]["dataset"], "evidence_ev-1");
        assert_eq!(body["graph_context"]["nodes"][0], "evidence_ev-1");
        assert_eq!(body["graph_context"]["edges"][0]["relation"], "mentions");
        assert_eq!(body["graph_context"]["edges"][0]["weight"], 0.5);
    }

    #[tokio::test]
    async fn test_repeated_cognify_does_not_change_search() {
        let router = router_with(InProcessBackend::new());
        call(&router, "POST", "/ingest", Some(evidence("ev-1", "network timeout"))).await;
        call(&router, "POST", "/cognify", None).await;

        let query = json!({"query": "timeout"});
        let (_, first) = call(&router, "POST", "/search", Some(query.clone())).await;
        call(&router, "POST", "/cognify", None).await;
        let (_, second) = call(&router, "POST", "/search", Some(query)).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_search_with_no_matches_has_null_graph() {
        let router = router_with(InProcessBackend::new());
        let (status, body) = call(&router, "POST", "/search", Some(json!({"query": "nothing"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"items": [], "graph_context": null}));
    }

    #[tokio::test]
    async fn test_search_top_k_out_of_range_is_422() {
        let router = router_with(InProcessBackend::new());

        for top_k in [0, 51] {
            let (status, body) = call(
                &router,
                "POST",
                "/search",
                Some(json!({"query": "q", "topK": top_k})),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_search_degrades_when_backend_down() {
        let router = router_with(DownBackend);
        let (status, body) = call(&router, "POST", "/search", Some(json!({"query": "q"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"items": [], "graph_context": null}));
    }

    #[tokio::test]
    async fn test_ingest_fails_loudly_when_backend_down() {
        let router = router_with(DownBackend);
        let (status, body) = call(&router, "POST", "/ingest", Some(evidence("ev-1", "x"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INGEST_FAILED");
        assert!(body["detail"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_cognify_reports_error_in_body() {
        let router = router_with(DownBackend);
        let (status, body) = call(&router, "POST", "/cognify", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "memory backend unavailable");
    }

    #[tokio::test]
    async fn test_ingest_empty_content_succeeds() {
        let router = router_with(InProcessBackend::new());
        let mut body = evidence("ev-blank", "");
        body["content_type"] = json!("screenshot_ocr");

        let (status, body) = call(&router, "POST", "/ingest", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"cognee_id": "cognee_ev-blank"}));
    }

    #[tokio::test]
    async fn test_malformed_ingest_body_is_422() {
        let router = router_with(InProcessBackend::new());
        let mut body = evidence("ev-1", "x");
        body["content_type"] = json!("video");

        let (status, body) = call(&router, "POST", "/ingest", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
