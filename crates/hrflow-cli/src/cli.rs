//! Command handlers and clap argument wrappers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types from `hrflow_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Orchestrator
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use hrflow_core::{
    display::{DecisionResult, InboxList, WorkflowList},
    params::{Decision, RequestId, WorkflowType},
    progress::Action,
    Orchestrator,
};
use log::debug;

use crate::renderer::TerminalRenderer;

#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// List every workflow chain in the catalog
    #[command(alias = "ls")]
    List,
    /// Preview the steps a new request of the given type goes through
    #[command(alias = "s")]
    Show(WorkflowTypeArgs),
    /// Print the active catalog as TOML, ready to edit and pass to --workflows
    Export,
}

#[derive(Subcommand)]
pub enum RequestCommands {
    /// Show a request with its approval chain and progress
    #[command(alias = "s")]
    Show(RequestIdArgs),
}

#[derive(Args)]
pub struct WorkflowTypeArgs {
    #[arg(help = "Request type: account_request, promotion, termination, transfer or salary_change")]
    pub request_type: String,
}

impl From<WorkflowTypeArgs> for WorkflowType {
    fn from(val: WorkflowTypeArgs) -> Self {
        WorkflowType {
            request_type: val.request_type,
        }
    }
}

#[derive(Args)]
pub struct RequestIdArgs {
    #[arg(help = "ID of the request to show")]
    pub request_id: String,
}

impl From<RequestIdArgs> for RequestId {
    fn from(val: RequestIdArgs) -> Self {
        RequestId {
            request_id: val.request_id,
        }
    }
}

#[derive(Args)]
pub struct DecisionArgs {
    #[arg(help = "ID of the pending approval, as listed by `hrflow inbox`")]
    pub approval_id: String,
    #[arg(short, long, help = "Optional comments stored with the decision")]
    pub comments: Option<String>,
}

impl From<DecisionArgs> for Decision {
    fn from(val: DecisionArgs) -> Self {
        Decision {
            approval_id: val.approval_id,
            comments: val.comments,
        }
    }
}

/// Runs one command against the orchestrator and renders the result.
pub struct Cli {
    orchestrator: Orchestrator,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(orchestrator: Orchestrator, renderer: TerminalRenderer) -> Self {
        Self {
            orchestrator,
            renderer,
        }
    }

    pub fn handle_workflow_command(&self, command: WorkflowCommands) -> Result<()> {
        match command {
            WorkflowCommands::List => self.list_workflows(),
            WorkflowCommands::Show(args) => self.show_workflow(&args.into()),
            WorkflowCommands::Export => self.export_workflows(),
        }
    }

    pub async fn handle_request_command(&self, command: RequestCommands) -> Result<()> {
        match command {
            RequestCommands::Show(args) => self.show_request(args.into()).await,
        }
    }

    fn list_workflows(&self) -> Result<()> {
        let chains = self.orchestrator.catalog().workflows().cloned().collect();
        self.renderer
            .render(&format!("# Workflows\n\n{}", WorkflowList(chains)))
    }

    fn export_workflows(&self) -> Result<()> {
        let toml = self.orchestrator.catalog().to_toml_string()?;
        print!("{toml}");
        Ok(())
    }

    fn show_workflow(&self, params: &WorkflowType) -> Result<()> {
        let preview = self.orchestrator.preview(params.request_type.trim());
        self.renderer.render(&preview.to_string())
    }

    pub async fn inbox(&self) -> Result<()> {
        let items = self
            .orchestrator
            .refresh_inbox()
            .await
            .context("Failed to fetch pending approvals")?;
        debug!("Rendering {} inbox items", items.len());
        self.renderer
            .render(&format!("# Pending Approvals\n\n{}", InboxList(items)))
    }

    async fn show_request(&self, params: RequestId) -> Result<()> {
        let params = params.validate()?;
        let view = self
            .orchestrator
            .request_detail(&params.request_id)
            .await
            .with_context(|| format!("Failed to fetch request {}", params.request_id))?;
        self.renderer.render(&view.to_string())
    }

    /// Sends a decision. Refusals and backend errors are returned unchanged
    /// so their message is what the user sees.
    pub async fn decide(&self, action: Action, params: Decision) -> Result<()> {
        let Decision {
            approval_id,
            comments,
        } = params.validate()?;

        let outcome = match action {
            Action::Approve => {
                self.orchestrator
                    .approve(&approval_id, comments.as_deref())
                    .await?
            }
            Action::Reject => {
                self.orchestrator
                    .reject(&approval_id, comments.as_deref())
                    .await?
            }
        };
        self.renderer.render(&DecisionResult(outcome).to_string())
    }
}
