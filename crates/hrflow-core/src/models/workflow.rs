//! Static workflow definitions.

use serde::{Deserialize, Serialize};

use super::RequestType;

/// One entry in a request type's approval chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowStepDefinition {
    /// 1-based position in the chain
    pub level: u32,

    /// Role authorized to act at this level
    pub approver_role: String,

    /// Human-readable label for the step
    pub description: String,
}

impl WorkflowStepDefinition {
    pub fn new(
        level: u32,
        approver_role: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            level,
            approver_role: approver_role.into(),
            description: description.into(),
        }
    }
}

/// The ordered approval chain for one request type.
///
/// Levels are contiguous from 1; the catalog refuses to load a chain that
/// breaks this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowChain {
    pub request_type: RequestType,

    /// Human-readable workflow name
    pub name: String,

    pub steps: Vec<WorkflowStepDefinition>,
}
