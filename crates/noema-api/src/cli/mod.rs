//! CLI command definitions for the `noema-memory` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the HTTP
//! service; the other commands run a single operation against the
//! configured backend and exit.

pub mod commands;

use clap::{Parser, Subcommand};

use noema_types::config::BackendKind;
use noema_types::evidence::ContentType;
use noema_types::search::DEFAULT_TOP_K;

/// Semantic memory service for NOEMA evidence.
#[derive(Parser)]
#[command(name = "noema-memory", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Memory backend to use (overrides config and NOEMA_BACKEND).
    #[arg(long, global = true)]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service.
    Serve {
        /// Address to bind (defaults to config / COGNEE_SERVICE_HOST).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (defaults to config / COGNEE_SERVICE_PORT).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Check whether the memory backend is operational.
    Health,

    /// Ingest a piece of evidence.
    Ingest {
        /// Evidence ID from NOEMA's evidence store.
        #[arg(long)]
        id: String,

        /// Kind of content (text, log, screenshot_ocr, transcript).
        #[arg(long, default_value = "text")]
        content_type: ContentType,

        /// Where the evidence came from.
        #[arg(long, default_value = "cli")]
        source: String,

        /// Capture timestamp (ISO-8601). Defaults to now.
        #[arg(long)]
        timestamp: Option<String>,

        /// Raw text content to index.
        content: String,
    },

    /// Build/update the backend's internal representations.
    Cognify,

    /// Search for evidence snippets and graph context.
    Search {
        /// Number of results to return (1-50).
        #[arg(long, short = 'k', default_value_t = DEFAULT_TOP_K)]
        top_k: u32,

        /// Natural language query.
        query: String,
    },
}
