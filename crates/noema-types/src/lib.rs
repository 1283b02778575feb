//! Shared domain types for the NOEMA memory service.
//!
//! This crate contains the types exchanged between the HTTP surface, the
//! service layer and the memory backend adapters: evidence ingestion
//! payloads, search results, the raw backend record shapes, configuration
//! and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod evidence;
pub mod raw;
pub mod search;
