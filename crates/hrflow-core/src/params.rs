//! Parameter structures shared by the CLI and the MCP server.
//!
//! Core structs stay free of interface frameworks. Each interface wraps them
//! with its own derives and converts at the edge:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! JSON schemas for MCP tool parameters are generated behind the `schema`
//! feature.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ApprovalError, Result};

/// Selects a workflow by request type tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WorkflowType {
    /// Request type tag, e.g. `account_request` or `promotion`
    pub request_type: String,
}

/// Identifies a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RequestId {
    pub request_id: String,
}

/// An approve or reject decision on one approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Decision {
    /// ID of the pending approval record
    pub approval_id: String,

    /// Optional note stored with the decision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Decision {
    /// Checks the approval ID and normalizes comments.
    ///
    /// Blank comments are treated as absent.
    ///
    /// ```rust
    /// use hrflow_core::params::Decision;
    ///
    /// let decision = Decision {
    ///     approval_id: " ap-1 ".to_string(),
    ///     comments: Some("   ".to_string()),
    /// }
    /// .validate()
    /// .unwrap();
    /// assert_eq!(decision.approval_id, "ap-1");
    /// assert_eq!(decision.comments, None);
    /// ```
    pub fn validate(self) -> Result<Self> {
        let approval_id = self.approval_id.trim().to_string();
        if approval_id.is_empty() {
            return Err(
                ApprovalError::invalid_input("approval_id").with_reason("must not be empty")
            );
        }
        let comments = self
            .comments
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            approval_id,
            comments,
        })
    }
}

impl RequestId {
    pub fn validate(self) -> Result<Self> {
        let request_id = self.request_id.trim().to_string();
        if request_id.is_empty() {
            return Err(ApprovalError::invalid_input("request_id").with_reason("must not be empty"));
        }
        Ok(Self { request_id })
    }
}
