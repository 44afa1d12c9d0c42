//! Progress and state derivation over projected steps.
//!
//! Steps are scanned in ascending level order. The first `pending` step is
//! the current level. A `rejected` step met before any `pending` one ends the
//! request: nothing after it is ever actionable, even if the backend has
//! already created records for later levels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{ApprovalStatus, ProjectedStep, WorkflowStepDefinition};

/// Overall state of a request's approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkflowState {
    /// No approval records exist yet
    NotStarted,
    /// The given level is waiting for its approver
    AwaitingLevel { level: u32, role: String },
    /// Every recorded level was approved
    Approved,
    /// The given level rejected the request
    Rejected { level: u32 },
}

impl WorkflowState {
    /// Approved and rejected requests take no further actions.
    pub fn is_resolved(&self) -> bool {
        matches!(self, WorkflowState::Approved | WorkflowState::Rejected { .. })
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::NotStarted => write!(f, "Not started"),
            WorkflowState::AwaitingLevel { level, role } => {
                write!(f, "Awaiting level {level} ({role})")
            }
            WorkflowState::Approved => write!(f, "Approved"),
            WorkflowState::Rejected { level } => write!(f, "Rejected at level {level}"),
        }
    }
}

/// A decision an approver can take on a pending step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Approve,
    Reject,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Approve => "approve",
            Action::Reject => "reject",
        }
    }

    /// Status the backend moves a record to when this action succeeds.
    pub fn resulting_status(&self) -> ApprovalStatus {
        match self {
            Action::Approve => ApprovalStatus::Approved,
            Action::Reject => ApprovalStatus::Rejected,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const DECISIONS: [Action; 2] = [Action::Approve, Action::Reject];

fn ascending(steps: &[ProjectedStep]) -> Vec<&ProjectedStep> {
    let mut ordered: Vec<&ProjectedStep> = steps.iter().collect();
    ordered.sort_by_key(|step| step.level);
    ordered
}

/// Derives the request state from its projected steps.
///
/// ```rust
/// use hrflow_core::{
///     models::ApprovalRecord,
///     progress::{derive_state, WorkflowState},
///     projector, WorkflowCatalog,
/// };
///
/// let catalog = WorkflowCatalog::builtin();
/// let steps = projector::project_submitted(&catalog, "termination", &[ApprovalRecord::pending("a1", 1)]);
/// assert_eq!(
///     derive_state(&steps),
///     WorkflowState::AwaitingLevel { level: 1, role: "Manager HR".to_string() }
/// );
/// ```
pub fn derive_state(steps: &[ProjectedStep]) -> WorkflowState {
    if steps.is_empty() {
        return WorkflowState::NotStarted;
    }

    for step in ascending(steps) {
        match step.status {
            ApprovalStatus::Approved => continue,
            ApprovalStatus::Pending => {
                return WorkflowState::AwaitingLevel {
                    level: step.level,
                    role: step.role.clone(),
                }
            }
            ApprovalStatus::Rejected => return WorkflowState::Rejected { level: step.level },
        }
    }

    WorkflowState::Approved
}

/// Lowest pending level, unless an earlier level rejected the request.
pub fn current_level(steps: &[ProjectedStep]) -> Option<u32> {
    match derive_state(steps) {
        WorkflowState::AwaitingLevel { level, .. } => Some(level),
        _ => None,
    }
}

/// The one step a decision may currently be taken on, if any.
pub fn actionable_step(steps: &[ProjectedStep]) -> Option<&ProjectedStep> {
    let level = current_level(steps)?;
    steps
        .iter()
        .find(|step| step.level == level && !available_actions(step).is_empty())
}

/// Actions offered for a single step.
///
/// Only pending steps backed by a record can be decided; approved and
/// rejected records are immutable.
pub fn available_actions(step: &ProjectedStep) -> &'static [Action] {
    if step.status == ApprovalStatus::Pending && step.record_id.is_some() {
        &DECISIONS
    } else {
        &[]
    }
}

/// Counts over a request's chain for progress display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Levels defined by the workflow chain
    pub total_levels: u32,
    pub approved: u32,
    pub rejected: u32,
    pub pending: u32,
    pub state: WorkflowState,
}

impl Progress {
    /// Summarizes projected steps against their workflow chain.
    ///
    /// The backend may create records one level at a time, so a request whose
    /// existing records are all approved still awaits the first chain level
    /// past them.
    pub fn from_steps(steps: &[ProjectedStep], chain: &[WorkflowStepDefinition]) -> Self {
        let count = |status: ApprovalStatus| {
            steps.iter().filter(|step| step.status == status).count() as u32
        };

        let state = match derive_state(steps) {
            WorkflowState::Approved => next_unrecorded_level(steps, chain),
            state => state,
        };

        Self {
            total_levels: chain.len() as u32,
            approved: count(ApprovalStatus::Approved),
            rejected: count(ApprovalStatus::Rejected),
            pending: count(ApprovalStatus::Pending),
            state,
        }
    }
}

fn next_unrecorded_level(
    steps: &[ProjectedStep],
    chain: &[WorkflowStepDefinition],
) -> WorkflowState {
    let highest = steps.iter().map(|step| step.level).max().unwrap_or(0);
    match chain.iter().find(|definition| definition.level > highest) {
        Some(next) => WorkflowState::AwaitingLevel {
            level: next.level,
            role: next.approver_role.clone(),
        },
        None => WorkflowState::Approved,
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{} approved)", self.state, self.approved, self.total_levels)
    }
}
