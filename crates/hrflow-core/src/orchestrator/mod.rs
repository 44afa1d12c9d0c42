//! Approval orchestrator: inbox state and approve/reject commands.
//!
//! The orchestrator sits between the pure core (catalog, projector, progress
//! derivation) and the [`ApprovalApi`] backend:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ WorkflowCatalog │    │  Orchestrator   │    │  Approval API   │
//! │  + projector    │───▶│ (inbox, gating, │───▶│ (source of      │
//! │  + progress     │    │  commands)      │    │  truth)         │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Command discipline
//!
//! - A decision is only sent for the request's current level. Once any level
//!   rejects, the request is over and later levels are refused locally.
//! - Nothing is marked approved or rejected locally before the backend
//!   confirms; a failed command leaves the cached inbox untouched and returns
//!   the backend's message verbatim.
//! - One command per approval at a time. The in-flight mark is released on
//!   every exit path so the user can retry by hand.
//! - Failures are never retried here.
//! - After a successful command the inbox and the request are fetched again;
//!   the backend's answer replaces whatever was cached.

mod builder;
mod in_flight;

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::RwLock;

pub use builder::OrchestratorBuilder;
use in_flight::InFlight;

use crate::{
    api::ApprovalApi,
    catalog::WorkflowCatalog,
    display::WorkflowPreview,
    error::{ApprovalError, Result},
    models::{ApprovalRecord, HrRequest, PendingApproval, ProjectedStep},
    progress::{self, Action, Progress},
    projector,
};

/// A request projected for display, with its derived progress.
#[derive(Debug, Clone, Serialize)]
pub struct RequestView {
    pub request: HrRequest,
    pub workflow_name: String,
    pub steps: Vec<ProjectedStep>,
    pub progress: Progress,
}

impl RequestView {
    /// Builds the view from a fetched request.
    pub fn new(catalog: &WorkflowCatalog, request: HrRequest) -> Self {
        let request_type = request.request_type.as_str();
        let steps = projector::project_submitted(catalog, request_type, &request.approvals);
        let progress = Progress::from_steps(&steps, catalog.chain_for(request_type));
        let workflow_name = catalog.name_for(request_type).to_string();

        Self {
            request,
            workflow_name,
            steps,
            progress,
        }
    }

    /// The step awaiting a decision, if any.
    pub fn actionable_step(&self) -> Option<&ProjectedStep> {
        progress::actionable_step(&self.steps)
    }
}

/// Result of a confirmed approve/reject command.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionOutcome {
    pub action: Action,
    /// Record as returned by the backend
    pub record: ApprovalRecord,
    /// Request re-fetched after the decision; `None` if that fetch failed
    pub request: Option<RequestView>,
}

/// Drives the approver's inbox and issues decisions against the backend.
pub struct Orchestrator {
    api: Arc<dyn ApprovalApi>,
    catalog: Arc<WorkflowCatalog>,
    inbox: RwLock<Vec<PendingApproval>>,
    in_flight: InFlight,
}

impl Orchestrator {
    /// Creates an orchestrator over an API and a catalog.
    pub fn new(api: Arc<dyn ApprovalApi>, catalog: Arc<WorkflowCatalog>) -> Self {
        Self {
            api,
            catalog,
            inbox: RwLock::new(Vec::new()),
            in_flight: InFlight::default(),
        }
    }

    pub fn catalog(&self) -> &WorkflowCatalog {
        &self.catalog
    }

    /// The chain an applicant should expect before submitting a request.
    pub fn preview(&self, request_type: &str) -> WorkflowPreview {
        WorkflowPreview::new(&self.catalog, request_type)
    }

    /// Fetches the pending approvals and replaces the cached inbox.
    pub async fn refresh_inbox(&self) -> Result<Vec<PendingApproval>> {
        let items = self.api.pending_approvals().await?;
        debug!("Inbox refreshed: {} pending approvals", items.len());
        *self.inbox.write().await = items.clone();
        Ok(items)
    }

    /// Inbox as of the last successful refresh.
    pub async fn inbox(&self) -> Vec<PendingApproval> {
        self.inbox.read().await.clone()
    }

    /// Fetches a request and projects its approval chain.
    pub async fn request_detail(&self, request_id: &str) -> Result<RequestView> {
        let request = self.api.request(request_id).await?;
        Ok(RequestView::new(&self.catalog, request))
    }

    /// Whether a command for this approval is currently on the wire.
    pub fn is_in_flight(&self, approval_id: &str) -> bool {
        self.in_flight.contains(approval_id)
    }

    /// Approves a pending approval.
    ///
    /// Blocked locally when the approval is not pending, when its request is
    /// not waiting on this level (an earlier level rejected it, or another
    /// level is current), or when a catalog precondition for its level such
    /// as an attached contract does not hold. No command is sent then.
    pub async fn approve(
        &self,
        approval_id: &str,
        comments: Option<&str>,
    ) -> Result<DecisionOutcome> {
        self.decide(Action::Approve, approval_id, comments).await
    }

    /// Rejects a pending approval.
    pub async fn reject(
        &self,
        approval_id: &str,
        comments: Option<&str>,
    ) -> Result<DecisionOutcome> {
        self.decide(Action::Reject, approval_id, comments).await
    }

    async fn decide(
        &self,
        action: Action,
        approval_id: &str,
        comments: Option<&str>,
    ) -> Result<DecisionOutcome> {
        let comments = comments.map(str::trim).filter(|c| !c.is_empty());
        let _guard = self.in_flight.acquire(approval_id)?;

        let item = self.resolve(approval_id).await?;
        if item.status.is_decided() {
            return Err(ApprovalError::NotPending {
                id: item.id,
                status: item.status,
            });
        }

        let request = self.api.request(&item.request.id).await?;
        self.check_actionable(&item, &request)?;
        if action == Action::Approve {
            self.check_preconditions(&item, &request)?;
        }

        debug!("Sending {action} for approval {approval_id}");
        let sent = match action {
            Action::Approve => self.api.approve(approval_id, comments).await,
            Action::Reject => self.api.reject(approval_id, comments).await,
        };
        let record = match sent {
            Ok(record) => record,
            Err(e) if e.is_backend_rejection() => {
                warn!("Backend refused {action} of approval {approval_id}: {e}");
                return Err(e);
            }
            Err(e) => {
                warn!("{action} of approval {approval_id} failed: {e}");
                return Err(e);
            }
        };
        info!(
            "Approval {approval_id} (level {}) is now {}",
            record.approval_level, record.status
        );
        if record.status != action.resulting_status() {
            warn!(
                "Backend confirmed {action} of approval {approval_id} but reports it {}",
                record.status
            );
        }

        if let Err(e) = self.refresh_inbox().await {
            warn!("Inbox refresh after {action} failed: {e}");
        }
        let request = match self.request_detail(&item.request.id).await {
            Ok(view) => Some(view),
            Err(e) => {
                warn!("Could not reload request {} after {action}: {e}", item.request.id);
                None
            }
        };

        Ok(DecisionOutcome {
            action,
            record,
            request,
        })
    }

    /// Finds an inbox item, refreshing the inbox once if it is not cached.
    async fn resolve(&self, approval_id: &str) -> Result<PendingApproval> {
        let cached = self
            .inbox
            .read()
            .await
            .iter()
            .find(|item| item.id == approval_id)
            .cloned();
        if let Some(item) = cached {
            return Ok(item);
        }

        self.refresh_inbox()
            .await?
            .into_iter()
            .find(|item| item.id == approval_id)
            .ok_or_else(|| ApprovalError::ApprovalNotFound {
                id: approval_id.to_string(),
            })
    }

    /// Refuses approvals the request is not waiting on: anything past a
    /// rejected level, and any level other than the current one.
    fn check_actionable(&self, item: &PendingApproval, request: &HrRequest) -> Result<()> {
        let steps =
            projector::project_submitted(&self.catalog, &request.request_type, &request.approvals);
        let state = progress::derive_state(&steps);
        let current = progress::actionable_step(&steps).and_then(|step| step.record_id.as_deref());

        if state.is_resolved() || current != Some(item.id.as_str()) {
            debug!("Approval {} is not actionable: request is {state}", item.id);
            return Err(ApprovalError::NotActionable {
                id: item.id.clone(),
                state,
            });
        }
        Ok(())
    }

    fn check_preconditions(&self, item: &PendingApproval, request: &HrRequest) -> Result<()> {
        let request_type = item.request.request_type.as_str();
        let Some(definition) = self
            .catalog
            .step_definition_at(request_type, item.approval_level)
        else {
            return Ok(());
        };

        let unmet = self
            .catalog
            .preconditions_for(request_type, item.approval_level, &definition.approver_role)
            .find(|precondition| !precondition.is_satisfied(request));
        match unmet {
            Some(precondition) => Err(ApprovalError::PreconditionUnmet {
                id: item.id.clone(),
                message: precondition.unmet_message(),
            }),
            None => Ok(()),
        }
    }
}
