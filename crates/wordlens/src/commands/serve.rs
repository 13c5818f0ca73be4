//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use wordlens_core::config::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve the analysis tools over MCP until the client disconnects.
///
/// Logs go to stderr, so stdout stays reserved for the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let ingest = config.ingest_options();
    info!(max_bytes = ?ingest.max_bytes, strict = ingest.strict, "starting MCP server on stdio");

    let service = ProjectServer::new(ingest)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service
        .waiting()
        .await
        .context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
