//! Collection wrappers with empty-list handling.

use std::fmt;

use crate::{
    models::{PendingApproval, ProjectedStep, WorkflowChain},
    progress,
};

/// Writes a chain of steps, marking the actionable one.
pub(crate) fn write_steps(f: &mut fmt::Formatter<'_>, steps: &[ProjectedStep]) -> fmt::Result {
    if steps.is_empty() {
        return writeln!(f, "No approval steps.");
    }
    let current = progress::actionable_step(steps).map(|step| step.level);
    for step in steps {
        step.fmt_step(f, current == Some(step.level))?;
    }
    Ok(())
}

/// Newtype wrapper for displaying an approval chain.
///
/// The step an approver can act on next is marked with `➤`; nothing is
/// marked once the chain is approved or rejected.
///
/// ```rust
/// use hrflow_core::{
///     display::StepList,
///     models::{ApprovalRecord, ApprovalStatus},
///     projector, WorkflowCatalog,
/// };
///
/// let catalog = WorkflowCatalog::builtin();
/// let mut first = ApprovalRecord::pending("ap-1", 1);
/// first.status = ApprovalStatus::Approved;
/// let records = vec![first, ApprovalRecord::pending("ap-2", 2)];
///
/// let steps = projector::project_submitted(&catalog, "promotion", &records);
/// let output = StepList(steps).to_string();
/// assert!(output.contains("### ➤ Level 2: Manager HR"));
/// ```
pub struct StepList(pub Vec<ProjectedStep>);

impl StepList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for StepList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_steps(f, &self.0)
    }
}

/// Newtype wrapper for displaying the approver's inbox.
pub struct InboxList(pub Vec<PendingApproval>);

impl InboxList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for InboxList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No pending approvals.");
        }
        for item in &self.0 {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the workflow catalog.
pub struct WorkflowList(pub Vec<WorkflowChain>);

impl fmt::Display for WorkflowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No workflows defined.");
        }
        for chain in &self.0 {
            write!(f, "{chain}")?;
        }
        Ok(())
    }
}
