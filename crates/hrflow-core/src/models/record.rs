//! Approval records owned by the backend.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ApprovalStatus;

/// Identity of whoever acted on an approval level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Approver {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One level's approval outcome for one request instance.
///
/// The backend is the only writer; this side reads lists of these and asks
/// the backend to decide pending ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApprovalRecord {
    #[serde(rename = "_id")]
    pub id: String,

    /// Level in the request's workflow chain (1-based)
    pub approval_level: u32,

    pub status: ApprovalStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<Approver>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<Timestamp>,
}

impl ApprovalRecord {
    /// A fresh record awaiting its approver.
    pub fn pending(id: impl Into<String>, approval_level: u32) -> Self {
        Self {
            id: id.into(),
            approval_level,
            status: ApprovalStatus::Pending,
            approver: None,
            comments: None,
            processed_at: None,
        }
    }
}
