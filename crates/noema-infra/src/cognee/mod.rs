//! Cognee REST backend.
//!
//! This module provides the [`CogneeHttpBackend`] which implements the
//! [`MemoryBackend`](noema_core::backend::MemoryBackend) trait against a
//! Cognee server's `/api/v1` endpoints.

pub mod client;
pub mod types;

pub use client::CogneeHttpBackend;
