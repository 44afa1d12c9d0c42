//! Approval API: the external backend that owns approval records.
//!
//! The backend stores requests, enforces who may approve what and performs
//! every status transition. This module only describes the contract the
//! orchestrator depends on ([`ApprovalApi`]) and ships an HTTP implementation
//! of it ([`HttpApprovalApi`]). Tests substitute in-memory implementations.

mod http;
pub mod payloads;

use async_trait::async_trait;

pub use http::HttpApprovalApi;

use crate::{
    error::Result,
    models::{ApprovalRecord, HrRequest, PendingApproval},
};

/// Operations offered by the Approval API backend.
#[async_trait]
pub trait ApprovalApi: Send + Sync {
    /// Approvals waiting on the current session's approver.
    async fn pending_approvals(&self) -> Result<Vec<PendingApproval>>;

    /// A request with its approval records embedded, ordered by level.
    async fn request(&self, request_id: &str) -> Result<HrRequest>;

    /// Moves a pending approval to `approved`.
    async fn approve(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord>;

    /// Moves a pending approval to `rejected`.
    async fn reject(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord>;
}
