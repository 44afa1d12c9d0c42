//! hrflow command-line application.
//!
//! Loads configuration, builds the orchestrator and dispatches to the CLI
//! handlers or the MCP server.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use hrflow_core::{
    config::{ConfigOverrides, HrflowConfig, LoadOptions},
    progress::Action,
    OrchestratorBuilder,
};
use log::info;
use mcp::{run_stdio_server, HrflowMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        api_url,
        workflows,
        no_color,
        command,
    } = Args::parse();

    let config = HrflowConfig::load(LoadOptions {
        config_path: config,
        overrides: ConfigOverrides {
            api_url,
            workflows_file: workflows,
        },
    })
    .context("Failed to load configuration")?;
    info!("Using Approval API at {}", config.api.base_url);

    let orchestrator = OrchestratorBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to initialize hrflow")?;

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Some(Workflow { command }) => {
            Cli::new(orchestrator, renderer).handle_workflow_command(command)
        }
        Some(Request { command }) => {
            Cli::new(orchestrator, renderer)
                .handle_request_command(command)
                .await
        }
        Some(Approve(args)) => {
            Cli::new(orchestrator, renderer)
                .decide(Action::Approve, args.into())
                .await
        }
        Some(Reject(args)) => {
            Cli::new(orchestrator, renderer)
                .decide(Action::Reject, args.into())
                .await
        }
        Some(Serve) => {
            info!("Starting hrflow MCP server");
            run_stdio_server(HrflowMcpServer::new(orchestrator))
                .await
                .context("MCP server failed")
        }
        Some(Inbox) | None => Cli::new(orchestrator, renderer).inbox().await,
    }
}
