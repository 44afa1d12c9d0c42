//! `Display` implementations for domain models.
//!
//! Kept apart from the model definitions so the models stay plain data.

use std::fmt;

use super::{collections::write_steps, datetime::LocalDateTime};
use crate::{
    models::{
        ApprovalStatus, HrRequest, PendingApproval, Person, ProjectedStep, RequestType,
        WorkflowChain,
    },
    orchestrator::RequestView,
};

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{email}>", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl ProjectedStep {
    /// Writes the step, marking it with `➤` when it is the current level.
    pub(crate) fn fmt_step(&self, f: &mut fmt::Formatter<'_>, current: bool) -> fmt::Result {
        let marker = if current { "➤ " } else { "" };
        writeln!(
            f,
            "### {marker}Level {}: {} ({})",
            self.level,
            self.role,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        writeln!(f, "- Approver: {}", self.approver_name())?;
        if let Some(email) = self.approver_email() {
            writeln!(f, "- Email: {email}")?;
        }
        if let Some(at) = &self.processed_at {
            writeln!(f, "- Processed: {}", LocalDateTime(at))?;
        }
        if let Some(record_id) = &self.record_id {
            writeln!(f, "- Approval ID: `{record_id}`")?;
        }
        if let Some(comments) = &self.comments {
            writeln!(f)?;
            writeln!(f, "> {comments}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ProjectedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_step(f, false)
    }
}

impl fmt::Display for PendingApproval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = &self.request;
        writeln!(
            f,
            "## {} (level {}, {})",
            request.request_type,
            self.approval_level,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- **Approval ID**: `{}`", self.id)?;
        writeln!(f, "- **Request ID**: `{}`", request.id)?;
        if let Some(requester) = &request.requester {
            writeln!(f, "- **Requester**: {requester}")?;
        }
        if let Some(role) = &request.target_role {
            writeln!(f, "- **Target role**: {role}")?;
        }
        if let Some(division) = &request.target_division {
            writeln!(f, "- **Target division**: {division}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for HrRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Request ID: `{}`", self.id)?;
        writeln!(f, "- Type: {}", self.request_type)?;
        if let Some(requester) = &self.requester {
            writeln!(f, "- Requester: {requester}")?;
        }
        if let Some(status) = &self.status {
            writeln!(f, "- Status: {status}")?;
        }

        if !self.documents.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Documents")?;
            writeln!(f)?;
            for doc in &self.documents {
                let name = doc.name.as_deref().unwrap_or(doc.document_type.as_str());
                match &doc.url {
                    Some(url) => writeln!(f, "- {} ({}): {url}", name, doc.document_type)?,
                    None => writeln!(f, "- {} ({})", name, doc.document_type)?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for RequestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.workflow_name)?;
        writeln!(f)?;
        write!(f, "{}", self.request)?;
        writeln!(f)?;
        writeln!(f, "**Progress**: {}", self.progress)?;
        writeln!(f)?;
        writeln!(f, "## Approval Chain")?;
        writeln!(f)?;
        write_steps(f, &self.steps)
    }
}

impl fmt::Display for WorkflowChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (`{}`)", self.name, self.request_type)?;
        writeln!(f)?;
        for step in &self.steps {
            writeln!(
                f,
                "{}. **{}**: {}",
                step.level, step.approver_role, step.description
            )?;
        }
        writeln!(f)
    }
}
