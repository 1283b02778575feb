//! Memory backend port, result normalization and service logic for NOEMA.
//!
//! This crate defines the `MemoryBackend` port that the infrastructure layer
//! implements, the normalizer that reconciles the backend's irregular
//! search records into the client-facing contract, and the `MemoryService`
//! that the HTTP and CLI surfaces call. It depends only on `noema-types` --
//! never on `noema-infra` or any HTTP crate.

pub mod backend;
pub mod normalize;
pub mod service;
