//! Observability setup for the NOEMA memory service.

pub mod tracing_setup;
