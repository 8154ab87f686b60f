//! # MCSManager MCP Server
//!
//! A Model Context Protocol server that exposes console tools for a game
//! server instance managed by MCSManager.
//!
//! Tool calls are forwarded to the panel's protected-instance HTTP API; the
//! player list is recovered by running `/list` and parsing the console output.

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use config::{Cli, McsmConfig};
use log_tools::TracingLevel;
use mcp_service::McpService;
use mcsm::McsmHttpClient;
use rmcp::ServiceExt;
use rmcp::transport::stdio;

mod config;
mod error;
mod log_tools;
mod mcp_service;
mod mcsm;
mod tool;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // File-based tracing; stdout carries the MCP protocol
    TracingLevel::init_file_tracing(cli.log_level);

    let config = match McsmConfig::from_cli(&cli) {
        Ok(config) => Arc::new(config),
        Err(report) => {
            eprintln!("mcsm_mcp: configuration error: {report:?}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting MCSManager MCP server for {} (trace level {:?})",
        config.base_url,
        TracingLevel::get_current_tracing_level()
    );

    let client = Arc::new(McsmHttpClient::new(config));
    let service = McpService::new(Arc::clone(&client) as Arc<dyn mcsm::ConsoleApi>);

    let server = service.serve(stdio()).await?;
    server.waiting().await?;

    client.close();
    tracing::info!("MCP client disconnected, shutting down");

    Ok(())
}
