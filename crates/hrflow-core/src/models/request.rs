//! HR requests and the inbox items that reference them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ApprovalRecord, ApprovalStatus};

/// Requester or approver contact info.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An attachment on a request. The file itself lives behind `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Kind of document, e.g. `contract`
    pub document_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A request together with its approval records, as returned by
/// `GET /requests/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HrRequest {
    #[serde(rename = "_id")]
    pub id: String,

    /// Kept as the raw tag so unknown types degrade instead of failing ingress
    pub request_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<Person>,

    /// Overall status as reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Approval records, ordered by level by the backend
    #[serde(default)]
    pub approvals: Vec<ApprovalRecord>,

    #[serde(default)]
    pub documents: Vec<Document>,

    /// Request-type specific fields (target role, division, salary, ...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl HrRequest {
    /// Whether a document of the given kind is attached.
    pub fn has_document(&self, document_type: &str) -> bool {
        self.documents
            .iter()
            .any(|doc| doc.document_type.eq_ignore_ascii_case(document_type))
    }
}

/// The request reference embedded in an inbox item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestRef {
    #[serde(rename = "_id")]
    pub id: String,

    pub request_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<Person>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_division: Option<String>,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// One approval awaiting the current approver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingApproval {
    #[serde(rename = "_id")]
    pub id: String,

    pub approval_level: u32,

    pub status: ApprovalStatus,

    pub request: RequestRef,
}
