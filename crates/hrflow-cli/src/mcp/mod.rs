//! MCP server implementation for hrflow
//!
//! Exposes the approval workflow to AI assistants over the Model Context
//! Protocol: workflow previews, the approver's inbox, request details and
//! approve/reject decisions.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use hrflow_core::{progress::Action, Orchestrator};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{Decision, McpResult, RequestId, WorkflowType};

/// MCP server for hrflow
#[derive(Clone)]
pub struct HrflowMcpServer {
    orchestrator: Arc<Orchestrator>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl HrflowMcpServer {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.orchestrator.clone())
    }

    #[tool(
        name = "list_workflows",
        description = "List every approval workflow: for each request type (account_request, promotion, termination, transfer, salary_change) the ordered levels and the role that must approve each one."
    )]
    async fn list_workflows(&self) -> McpResult {
        self.handlers().list_workflows().await
    }

    #[tool(
        name = "preview_workflow",
        description = "Preview the approval steps a new request of the given type will go through before it is submitted. All steps are shown as pending with no approver. Unknown request types have no steps."
    )]
    async fn preview_workflow(&self, params: Parameters<WorkflowType>) -> McpResult {
        self.handlers().preview_workflow(params).await
    }

    #[tool(
        name = "list_pending_approvals",
        description = "Fetch the approvals currently waiting on the signed-in approver. Each item shows its approval ID (used by approve/reject), the request ID, request type, level and requester."
    )]
    async fn list_pending_approvals(&self) -> McpResult {
        self.handlers().list_pending_approvals().await
    }

    #[tool(
        name = "show_request",
        description = "Show a request with its attached documents and full approval chain: each level's role, status, approver, comments and decision time, plus overall progress. The level awaiting a decision is marked."
    )]
    async fn show_request(&self, params: Parameters<RequestId>) -> McpResult {
        self.handlers().show_request(params).await
    }

    #[tool(
        name = "approve",
        description = "Approve a pending approval by its approval ID, with optional comments. Refused locally if the approval is no longer pending or a required document (such as the contract for account requests) is missing. Backend refusals are returned verbatim and are never retried."
    )]
    async fn approve(&self, params: Parameters<Decision>) -> McpResult {
        self.handlers().decide(Action::Approve, params).await
    }

    #[tool(
        name = "reject",
        description = "Reject a pending approval by its approval ID. Rejection ends the whole request; include comments explaining why. Backend refusals are returned verbatim and are never retried."
    )]
    async fn reject(&self, params: Parameters<Decision>) -> McpResult {
        self.handlers().decide(Action::Reject, params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for HrflowMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "hrflow".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"hrflow gives access to a multi-level HR approval workflow.

## Core Concepts
- **Request types**: account_request, promotion, termination, transfer, salary_change
- **Workflow chain**: ordered levels, each approved by one role (Supervisor, Manager HR, Finance Manager, Director)
- **Approval**: one level of one request; pending, approved or rejected. A rejection at any level ends the request.

## Typical Flow
1. `list_pending_approvals` to see what waits on the approver
2. `show_request` to review a request and its chain
3. `approve` or `reject` with the approval ID, after the approver confirms

Use `list_workflows` and `preview_workflow` to explain which roles will sign off on a request type.

## Rules
- Decisions are final; approved and rejected levels cannot change.
- Error messages from the backend are the approver's answer; show them as-is.
- Do not retry a failed decision unless asked."#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: HrflowMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting hrflow MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = match server.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            error!("serving error: {e:?}");
            return Err(e.into());
        }
    };

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
