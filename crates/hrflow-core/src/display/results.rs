//! Wrappers for command outcomes.

use std::fmt;

use super::collections::StepList;
use crate::{catalog::WorkflowCatalog, orchestrator::DecisionOutcome, progress::Action, projector};

/// Displays the outcome of a confirmed approve/reject command, followed by the
/// reloaded request when available.
pub struct DecisionResult(pub DecisionOutcome);

impl fmt::Display for DecisionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = &self.0;
        let verb = match outcome.action {
            Action::Approve => "Approved",
            Action::Reject => "Rejected",
        };
        writeln!(
            f,
            "{verb} approval `{}` at level {} ({})",
            outcome.record.id,
            outcome.record.approval_level,
            outcome.record.status.with_icon()
        )?;
        if let Some(comments) = &outcome.record.comments {
            writeln!(f)?;
            writeln!(f, "> {comments}")?;
        }
        writeln!(f)?;

        match &outcome.request {
            Some(view) => write!(f, "{view}"),
            None => writeln!(f, "The request could not be reloaded; its current state is unknown."),
        }
    }
}

/// The chain an applicant should expect for a request type.
pub struct WorkflowPreview {
    pub request_type: String,
    pub name: String,
    pub steps: StepList,
}

impl WorkflowPreview {
    pub fn new(catalog: &WorkflowCatalog, request_type: &str) -> Self {
        Self {
            request_type: request_type.to_string(),
            name: catalog.name_for(request_type).to_string(),
            steps: StepList(projector::project_preview(catalog, request_type)),
        }
    }
}

impl fmt::Display for WorkflowPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        if self.steps.is_empty() {
            return writeln!(
                f,
                "No approval workflow is defined for `{}`.",
                self.request_type
            );
        }
        writeln!(f, "Levels: {}", self.steps.len())?;
        writeln!(f)?;
        write!(f, "{}", self.steps)
    }
}
