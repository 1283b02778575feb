//! Infrastructure layer for the NOEMA memory service.
//!
//! Contains implementations of the `MemoryBackend` port defined in
//! `noema-core`: a REST client for a Cognee server and an in-process backend
//! for local development. Also loads service configuration and resolves the
//! data directory.

pub mod cognee;
pub mod config;
pub mod in_process;
