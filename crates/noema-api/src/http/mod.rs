//! HTTP/REST API layer for the memory service.
//!
//! Axum-based API with plain JSON bodies and CORS support. Paths are kept at
//! the root (`/health`, `/ingest`, `/cognify`, `/search`) for existing NOEMA
//! clients.

pub mod error;
pub mod handlers;
pub mod router;
