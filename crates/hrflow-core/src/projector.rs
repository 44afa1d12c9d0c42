//! Step projector: turns approval records into display-ready steps.
//!
//! Two projections exist and are never conflated:
//!
//! - [`project_submitted`] follows the records the backend has created so far.
//!   One step per record, even when the chain is longer.
//! - [`project_preview`] follows the catalog chain for requests that do not
//!   exist yet. Every step is pending and nobody has acted.

use log::warn;

use crate::{
    catalog::WorkflowCatalog,
    models::{ApprovalRecord, ApprovalStatus, ProjectedStep},
};

/// Role shown for a record whose level has no catalog entry.
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Projects the approval records of a submitted request.
///
/// Records are ordered by level before projection; the sort is stable, so
/// records sharing a level keep their input order. A level missing from the
/// catalog still yields a step, with role `"Unknown"` and description
/// `"Level {n}"`.
///
/// ```rust
/// use hrflow_core::{models::ApprovalRecord, projector, WorkflowCatalog};
///
/// let catalog = WorkflowCatalog::builtin();
/// let records = vec![ApprovalRecord::pending("a1", 1)];
/// let steps = projector::project_submitted(&catalog, "promotion", &records);
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].role, "Supervisor");
/// ```
pub fn project_submitted(
    catalog: &WorkflowCatalog,
    request_type: &str,
    records: &[ApprovalRecord],
) -> Vec<ProjectedStep> {
    let mut ordered: Vec<&ApprovalRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.approval_level);

    ordered
        .into_iter()
        .map(|record| project_record(catalog, request_type, record))
        .collect()
}

/// Projects a single record against the catalog.
pub fn project_record(
    catalog: &WorkflowCatalog,
    request_type: &str,
    record: &ApprovalRecord,
) -> ProjectedStep {
    let level = record.approval_level;
    let (role, description) = match catalog.step_definition_at(request_type, level) {
        Some(definition) => (
            definition.approver_role.clone(),
            definition.description.clone(),
        ),
        None => {
            warn!(
                "Approval {} has level {level}, which '{request_type}' does not define",
                record.id
            );
            (UNKNOWN_ROLE.to_string(), format!("Level {level}"))
        }
    };

    ProjectedStep {
        level,
        role,
        description,
        status: record.status,
        record_id: Some(record.id.clone()),
        approver: record.approver.clone(),
        comments: record.comments.clone(),
        processed_at: record.processed_at,
    }
}

/// Projects the full chain a not-yet-submitted request will go through.
pub fn project_preview(catalog: &WorkflowCatalog, request_type: &str) -> Vec<ProjectedStep> {
    catalog
        .chain_for(request_type)
        .iter()
        .map(|definition| ProjectedStep {
            level: definition.level,
            role: definition.approver_role.clone(),
            description: definition.description.clone(),
            status: ApprovalStatus::Pending,
            record_id: None,
            approver: None,
            comments: None,
            processed_at: None,
        })
        .collect()
}
