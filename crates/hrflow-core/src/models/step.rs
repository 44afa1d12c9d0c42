//! Projected step model: one display row of a request's approval chain.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ApprovalStatus, Approver};

/// Placeholder shown when nobody has acted on a level yet.
pub const NOT_AVAILABLE: &str = "N/A";

/// A workflow step decorated with the state of its approval record.
///
/// Recomputed from the catalog and the current record list whenever it is
/// needed; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectedStep {
    pub level: u32,

    /// Required approver role, taken from the catalog
    pub role: String,

    pub description: String,

    pub status: ApprovalStatus,

    /// ID of the backing approval record; absent in previews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<Approver>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<Timestamp>,
}

impl ProjectedStep {
    /// Name of whoever acted, or `"N/A"`.
    pub fn approver_name(&self) -> &str {
        self.approver
            .as_ref()
            .map_or(NOT_AVAILABLE, |approver| approver.name.as_str())
    }

    pub fn approver_email(&self) -> Option<&str> {
        self.approver
            .as_ref()
            .and_then(|approver| approver.email.as_deref())
    }
}
