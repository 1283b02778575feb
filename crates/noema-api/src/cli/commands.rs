//! One-shot CLI commands against the configured memory backend.

use noema_types::evidence::{CognifyStatus, ContentType, IngestMetadata, IngestRequest};

use crate::state::AppState;

/// Print backend health.
pub async fn health(state: &AppState, json: bool) -> anyhow::Result<()> {
    let healthy = state.memory.health_check().await;

    if json {
        let out = serde_json::json!({
            "backend": state.memory.backend_name(),
            "healthy": healthy,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if healthy {
        println!(
            "  {} {} backend is operational",
            console::style("✓").green(),
            state.memory.backend_name()
        );
    } else {
        println!(
            "  {} {} backend is not operational",
            console::style("✗").red(),
            state.memory.backend_name()
        );
    }

    if !healthy {
        anyhow::bail!("memory backend health check failed");
    }
    Ok(())
}

/// Ingest one piece of evidence.
pub async fn ingest(
    state: &AppState,
    id: String,
    content_type: ContentType,
    source: String,
    timestamp: Option<String>,
    content: String,
    json: bool,
) -> anyhow::Result<()> {
    let request = IngestRequest {
        evidence_id: id,
        content,
        content_type,
        metadata: IngestMetadata {
            source,
            timestamp: timestamp.unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            extra: None,
        },
    };

    let response = state.memory.ingest_evidence(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!(
            "  {} Ingested {} as {}",
            console::style("✓").green(),
            request.evidence_id,
            console::style(&response.cognee_id).cyan()
        );
    }
    Ok(())
}

/// Run the backend's indexing step.
pub async fn cognify(state: &AppState, json: bool) -> anyhow::Result<()> {
    let response = state.memory.reindex_all().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if response.status == CognifyStatus::Completed {
        println!("  {} Cognify completed", console::style("✓").green());
    } else {
        println!(
            "  {} Cognify failed: {}",
            console::style("✗").red(),
            response.message.as_deref().unwrap_or("unknown error")
        );
    }

    if response.status == CognifyStatus::Error {
        anyhow::bail!("cognify failed");
    }
    Ok(())
}

/// Search and print results.
pub async fn search(state: &AppState, query: &str, top_k: u32, json: bool) -> anyhow::Result<()> {
    let response = state.memory.search(query, top_k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.items.is_empty() {
        println!("  No results for '{}'", console::style(query).cyan());
        return Ok(());
    }

    println!();
    for item in &response.items {
        println!(
            "  {} {}",
            console::style(&item.cognee_id).bold(),
            console::style(format!("{:.2}", item.score)).dim()
        );
        for line in item.snippet.lines() {
            println!("    {line}");
        }
        println!();
    }

    if let Some(graph) = &response.graph_context {
        println!("  {}", console::style("Graph context").bold());
        if !graph.nodes.is_empty() {
            println!("    nodes: {}", graph.nodes.join(", "));
        }
        for edge in &graph.edges {
            println!(
                "    {} -[{}]-> {}",
                edge.from_node, edge.relation, edge.to_node
            );
        }
        println!();
    }
    Ok(())
}
