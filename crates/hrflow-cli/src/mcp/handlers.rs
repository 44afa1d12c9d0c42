//! MCP tool handlers implementation

use std::sync::Arc;

use hrflow_core::{
    display::{DecisionResult, InboxList, WorkflowList},
    params as core,
    progress::Action,
    Orchestrator,
};
use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{
    errors::{refusal_result, to_mcp_error},
    prompts::prompt_templates,
};

/// Generic MCP wrapper for core parameter types.
///
/// Deserializes transparently into the wrapped type and forwards its JSON
/// schema, so core params need no MCP-specific derives of their own.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> McpParams<T>
where
    T: JsonSchema,
{
    pub fn into_inner(self) -> T {
        self.0
    }
}

pub type WorkflowType = McpParams<core::WorkflowType>;
pub type RequestId = McpParams<core::RequestId>;
pub type Decision = McpParams<core::Decision>;

pub type McpResult = Result<CallToolResult, McpError>;

fn text_result(text: String) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    orchestrator: Arc<Orchestrator>,
}

impl McpHandlers {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn list_workflows(&self) -> McpResult {
        debug!("list_workflows");
        let chains = self.orchestrator.catalog().workflows().cloned().collect();
        text_result(format!("# Workflows\n\n{}", WorkflowList(chains)))
    }

    pub async fn preview_workflow(
        &self,
        Parameters(params): Parameters<WorkflowType>,
    ) -> McpResult {
        let params = params.into_inner();
        debug!("preview_workflow: {params:?}");
        let preview = self.orchestrator.preview(params.request_type.trim());
        text_result(preview.to_string())
    }

    pub async fn list_pending_approvals(&self) -> McpResult {
        debug!("list_pending_approvals");
        let items = self
            .orchestrator
            .refresh_inbox()
            .await
            .map_err(|e| to_mcp_error("Failed to fetch pending approvals", &e))?;
        text_result(format!("# Pending Approvals\n\n{}", InboxList(items)))
    }

    pub async fn show_request(&self, Parameters(params): Parameters<RequestId>) -> McpResult {
        let params = params
            .into_inner()
            .validate()
            .map_err(|e| to_mcp_error("Invalid request ID", &e))?;
        debug!("show_request: {}", params.request_id);

        let view = self
            .orchestrator
            .request_detail(&params.request_id)
            .await
            .map_err(|e| to_mcp_error("Failed to fetch request", &e))?;
        text_result(view.to_string())
    }

    pub async fn decide(
        &self,
        action: Action,
        Parameters(params): Parameters<Decision>,
    ) -> McpResult {
        let core::Decision {
            approval_id,
            comments,
        } = params
            .into_inner()
            .validate()
            .map_err(|e| to_mcp_error("Invalid decision", &e))?;
        debug!("{action}: {approval_id}");

        let result = match action {
            Action::Approve => {
                self.orchestrator
                    .approve(&approval_id, comments.as_deref())
                    .await
            }
            Action::Reject => {
                self.orchestrator
                    .reject(&approval_id, comments.as_deref())
                    .await
            }
        };

        match result {
            Ok(outcome) => text_result(DecisionResult(outcome).to_string()),
            Err(e) => match refusal_result(&e) {
                Some(refused) => Ok(refused),
                None => Err(to_mcp_error(&format!("Failed to {action} {approval_id}"), &e)),
            },
        }
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let prompts = prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let templates = prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let args = request.arguments.as_ref();
        let prompt_text = template
            .apply(
                |name| args.and_then(|a| a.get(name)).and_then(|v| v.as_str()),
                "All pending approvals",
            )
            .map_err(|message| McpError::invalid_params(message, None))?;

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
