//! NOEMA memory service entry point.
//!
//! Binary name: `noema-memory`
//!
//! Parses CLI arguments, sets up tracing, wires the memory service to the
//! configured backend, then either serves the HTTP API or runs a single
//! command.

mod cli;
mod http;
mod state;

use clap::Parser;

use noema_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let enable_otel = std::env::var("NOEMA_OTEL")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.backend).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            serve(state, &host, port).await?;
        }

        Commands::Health => {
            cli::commands::health(&state, cli.json).await?;
        }

        Commands::Ingest {
            id,
            content_type,
            source,
            timestamp,
            content,
        } => {
            cli::commands::ingest(&state, id, content_type, source, timestamp, content, cli.json)
                .await?;
        }

        Commands::Cognify => {
            cli::commands::cognify(&state, cli.json).await?;
        }

        Commands::Search { top_k, query } => {
            cli::commands::search(&state, &query, top_k, cli.json).await?;
        }
    }

    Ok(())
}

/// Run the HTTP service until Ctrl+C or SIGTERM.
async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting memory service...");
    // Startup continues on failure; /health reports it and later calls retry.
    if let Err(e) = state.memory.initialize().await {
        tracing::warn!(error = %e, "memory backend failed to initialize at startup");
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        %addr,
        backend = state.memory.backend_name(),
        data_dir = %state.data_dir.display(),
        "Memory service ready"
    );

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down memory service...");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
