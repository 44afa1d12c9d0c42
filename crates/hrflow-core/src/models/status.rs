//! Status and request type enumerations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of one approval level for one request instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision
    Pending,

    /// Signed off by the level's approver
    Approved,

    /// Turned down; terminal for the whole request
    Rejected,
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(format!("Invalid approval status: {s}")),
        }
    }
}

impl ApprovalStatus {
    /// Wire representation used by the Approval API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected records never change again.
    pub fn is_decided(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hrflow_core::models::ApprovalStatus;
    ///
    /// assert_eq!(ApprovalStatus::Approved.with_icon(), "✓ Approved");
    /// assert_eq!(ApprovalStatus::Rejected.with_icon(), "✗ Rejected");
    /// assert_eq!(ApprovalStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "✓ Approved",
            ApprovalStatus::Rejected => "✗ Rejected",
            ApprovalStatus::Pending => "○ Pending",
        }
    }
}

/// The kind of HR action a request asks for. Selects the workflow chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    AccountRequest,
    Promotion,
    Termination,
    Transfer,
    SalaryChange,
}

impl RequestType {
    /// Every request type, in catalog display order.
    pub const ALL: [RequestType; 5] = [
        RequestType::AccountRequest,
        RequestType::Promotion,
        RequestType::Termination,
        RequestType::Transfer,
        RequestType::SalaryChange,
    ];

    /// Wire tag for this request type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::AccountRequest => "account_request",
            RequestType::Promotion => "promotion",
            RequestType::Termination => "termination",
            RequestType::Transfer => "transfer",
            RequestType::SalaryChange => "salary_change",
        }
    }
}

impl FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account_request" => Ok(RequestType::AccountRequest),
            "promotion" => Ok(RequestType::Promotion),
            "termination" => Ok(RequestType::Termination),
            "transfer" => Ok(RequestType::Transfer),
            "salary_change" => Ok(RequestType::SalaryChange),
            _ => Err(format!("Unknown request type: {s}")),
        }
    }
}
