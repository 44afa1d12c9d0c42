use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DecisionArgs, RequestCommands, WorkflowCommands};

/// Multi-level HR approval workflows from the command line
///
/// hrflow shows which roles must sign off on account requests, promotions,
/// terminations, transfers and salary changes, lists the approvals waiting on
/// you, and sends approve/reject decisions to the Approval API. It can also
/// run as an MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "hrflow")]
pub struct Args {
    /// Configuration file. Defaults to $XDG_CONFIG_HOME/hrflow/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the Approval API, e.g. https://hr.example.co.id/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// TOML workflow catalog replacing the built-in one
    #[arg(long, global = true)]
    pub workflows: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, the inbox is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect workflow chains
    #[command(alias = "w")]
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
    /// List approvals waiting on you
    #[command(alias = "i")]
    Inbox,
    /// Inspect requests
    #[command(alias = "r")]
    Request {
        #[command(subcommand)]
        command: RequestCommands,
    },
    /// Approve a pending approval
    #[command(alias = "a")]
    Approve(DecisionArgs),
    /// Reject a pending approval
    Reject(DecisionArgs),
    /// Start the MCP server
    Serve,
}
