#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use hrflow_core::{
    api::ApprovalApi,
    models::{
        ApprovalRecord, ApprovalStatus, Approver, Document, HrRequest, PendingApproval, Person,
        RequestRef,
    },
    ApprovalError, Orchestrator, OrchestratorBuilder, Result, WorkflowCatalog,
};
use tokio::sync::Notify;

/// A call received by the fake backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Pending,
    Request(String),
    Approve(String, Option<String>),
    Reject(String, Option<String>),
}

#[derive(Default)]
struct State {
    requests: HashMap<String, HrRequest>,
    calls: Vec<Call>,
    decision_failure: Option<(u16, String)>,
    fail_reloads: bool,
    list_decided: bool,
}

/// In-memory Approval API.
///
/// Pending approvals are derived from the stored requests: every pending
/// record whose earlier levels are all approved.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
    hold_decisions: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new(requests: Vec<HrRequest>) -> Self {
        let api = Self::default();
        {
            let mut state = api.state.lock().unwrap();
            for request in requests {
                state.requests.insert(request.id.clone(), request);
            }
        }
        api
    }

    /// Decisions wait for `notify` before answering.
    pub fn holding_decisions(mut self, notify: Arc<Notify>) -> Self {
        self.hold_decisions = Some(notify);
        self
    }

    /// Every decision fails with this status and message.
    pub fn fail_decisions(&self, status: u16, message: &str) {
        self.state.lock().unwrap().decision_failure = Some((status, message.to_string()));
    }

    /// Request fetches fail once a decision has been received.
    pub fn fail_reloads(&self) {
        self.state.lock().unwrap().fail_reloads = true;
    }

    /// The inbox also lists records that were already decided, like a
    /// backend with a stale index.
    pub fn list_decided(&self) {
        self.state.lock().unwrap().list_decided = true;
    }

    pub fn attach_document(&self, request_id: &str, document_type: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(request) = state.requests.get_mut(request_id) {
            request.documents.push(Document {
                id: None,
                document_type: document_type.to_string(),
                name: None,
                url: None,
            });
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn decision_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Approve(..) | Call::Reject(..)))
            .count()
    }

    pub fn record(&self, approval_id: &str) -> Option<ApprovalRecord> {
        let state = self.state.lock().unwrap();
        state
            .requests
            .values()
            .flat_map(|request| request.approvals.iter())
            .find(|record| record.id == approval_id)
            .cloned()
    }

    fn pending_items(state: &State) -> Vec<PendingApproval> {
        let mut items = Vec::new();
        for request in state.requests.values() {
            let mut ordered: Vec<&ApprovalRecord> = request.approvals.iter().collect();
            ordered.sort_by_key(|record| record.approval_level);
            let item = |record: &ApprovalRecord| PendingApproval {
                id: record.id.clone(),
                approval_level: record.approval_level,
                status: record.status,
                request: RequestRef {
                    id: request.id.clone(),
                    request_type: request.request_type.clone(),
                    requester: request.requester.clone(),
                    target_role: None,
                    target_division: None,
                    details: Default::default(),
                },
            };
            if state.list_decided {
                items.extend(ordered.into_iter().map(&item));
                continue;
            }
            for record in ordered {
                match record.status {
                    ApprovalStatus::Approved => continue,
                    ApprovalStatus::Rejected => break,
                    ApprovalStatus::Pending => {
                        items.push(item(record));
                        break;
                    }
                }
            }
        }
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    async fn decide(
        &self,
        call: Call,
        approval_id: &str,
        comments: Option<&str>,
        status: ApprovalStatus,
    ) -> Result<ApprovalRecord> {
        self.state.lock().unwrap().calls.push(call);
        if let Some(notify) = &self.hold_decisions {
            notify.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some((status, message)) = state.decision_failure.clone() {
            return Err(ApprovalError::Api { status, message });
        }
        let record = state
            .requests
            .values_mut()
            .flat_map(|request| request.approvals.iter_mut())
            .find(|record| record.id == approval_id)
            .ok_or_else(|| ApprovalError::ApprovalNotFound {
                id: approval_id.to_string(),
            })?;
        record.status = status;
        record.comments = comments.map(str::to_string);
        record.approver = Some(Approver {
            name: "Test Approver".to_string(),
            email: None,
            role: None,
        });
        record.processed_at = Some(jiff::Timestamp::now());
        Ok(record.clone())
    }
}

#[async_trait]
impl ApprovalApi for FakeApi {
    async fn pending_approvals(&self) -> Result<Vec<PendingApproval>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Pending);
        Ok(Self::pending_items(&state))
    }

    async fn request(&self, request_id: &str) -> Result<HrRequest> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Request(request_id.to_string()));
        let decided = state
            .calls
            .iter()
            .any(|call| matches!(call, Call::Approve(..) | Call::Reject(..)));
        if state.fail_reloads && decided {
            return Err(ApprovalError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        state
            .requests
            .get(request_id)
            .cloned()
            .ok_or_else(|| ApprovalError::RequestNotFound {
                id: request_id.to_string(),
            })
    }

    async fn approve(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord> {
        let call = Call::Approve(approval_id.to_string(), comments.map(str::to_string));
        self.decide(call, approval_id, comments, ApprovalStatus::Approved)
            .await
    }

    async fn reject(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord> {
        let call = Call::Reject(approval_id.to_string(), comments.map(str::to_string));
        self.decide(call, approval_id, comments, ApprovalStatus::Rejected)
            .await
    }
}

pub fn record(id: &str, level: u32, status: ApprovalStatus) -> ApprovalRecord {
    let mut record = ApprovalRecord::pending(id, level);
    record.status = status;
    record
}

pub fn request(id: &str, request_type: &str, approvals: Vec<ApprovalRecord>) -> HrRequest {
    HrRequest {
        id: id.to_string(),
        request_type: request_type.to_string(),
        requester: Some(Person {
            name: "Budi Santoso".to_string(),
            email: Some("budi@example.co.id".to_string()),
        }),
        status: Some("pending".to_string()),
        approvals,
        documents: Vec::new(),
        details: Default::default(),
    }
}

/// An account request waiting on Manager HR, without a contract attached,
/// and a promotion waiting on level 2.
pub fn sample_requests() -> Vec<HrRequest> {
    vec![
        request(
            "rq-account",
            "account_request",
            vec![
                record("ap-acc-1", 1, ApprovalStatus::Pending),
                record("ap-acc-2", 2, ApprovalStatus::Pending),
            ],
        ),
        request(
            "rq-promo",
            "promotion",
            vec![
                record("ap-pro-1", 1, ApprovalStatus::Approved),
                record("ap-pro-2", 2, ApprovalStatus::Pending),
                record("ap-pro-3", 3, ApprovalStatus::Pending),
            ],
        ),
    ]
}

/// Builds an orchestrator over `api` with the built-in catalog.
pub async fn orchestrator(api: Arc<FakeApi>) -> Orchestrator {
    OrchestratorBuilder::new()
        .with_catalog(WorkflowCatalog::builtin())
        .with_api(api)
        .build()
        .await
        .expect("Failed to build orchestrator")
}
