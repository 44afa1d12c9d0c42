//! Error mapping for MCP tool results.

use hrflow_core::{display::OperationStatus, ApprovalError};
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData,
};

/// Converts a core error into an MCP protocol error, prefixed with context.
pub fn to_mcp_error(context: &str, error: &ApprovalError) -> ErrorData {
    match error {
        ApprovalError::InvalidInput { .. } => ErrorData::invalid_params(error.to_string(), None),
        _ => ErrorData::internal_error(format!("{context}: {error}"), None),
    }
}

/// Turns a refused decision into a tool-level error result.
///
/// Backend rejections and local refusals are answers for the approver, not
/// protocol failures, so they travel as tool output with the message
/// unchanged. Anything else yields `None`.
pub fn refusal_result(error: &ApprovalError) -> Option<CallToolResult> {
    match error {
        ApprovalError::Api { .. }
        | ApprovalError::ApprovalNotFound { .. }
        | ApprovalError::NotPending { .. }
        | ApprovalError::NotActionable { .. }
        | ApprovalError::PreconditionUnmet { .. }
        | ApprovalError::ActionInFlight { .. } => {
            let status = OperationStatus::failure(error.to_string());
            Some(CallToolResult::error(vec![Content::text(status.to_string())]))
        }
        _ => None,
    }
}
