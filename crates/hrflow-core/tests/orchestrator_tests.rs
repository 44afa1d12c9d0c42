mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{orchestrator, record, request, sample_requests, Call, FakeApi};
use hrflow_core::{
    api::{ApprovalApi, HttpApprovalApi},
    config::ApiConfig,
    models::{ApprovalRecord, ApprovalStatus, HrRequest, PendingApproval},
    progress::{Action, WorkflowState},
    ApprovalError, OrchestratorBuilder, Result, WorkflowCatalog,
};
use tokio::sync::Notify;

/// Reads come from the fake; decisions go to an HTTP client nobody answers.
struct UnreachableDecisions {
    reads: Arc<FakeApi>,
    writes: HttpApprovalApi,
}

#[async_trait]
impl ApprovalApi for UnreachableDecisions {
    async fn pending_approvals(&self) -> Result<Vec<PendingApproval>> {
        self.reads.pending_approvals().await
    }

    async fn request(&self, request_id: &str) -> Result<HrRequest> {
        self.reads.request(request_id).await
    }

    async fn approve(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord> {
        self.writes.approve(approval_id, comments).await
    }

    async fn reject(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord> {
        self.writes.reject(approval_id, comments).await
    }
}

#[tokio::test]
async fn test_refresh_inbox_caches_items() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;

    assert!(orchestrator.inbox().await.is_empty());
    let items = orchestrator.refresh_inbox().await.unwrap();
    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["ap-acc-1", "ap-pro-2"]);
    assert_eq!(orchestrator.inbox().await, items);
}

#[tokio::test]
async fn test_request_detail_projects_chain() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api).await;

    let view = orchestrator.request_detail("rq-promo").await.unwrap();
    assert_eq!(view.workflow_name, "Promotion Approval");
    assert_eq!(view.steps.len(), 3);
    assert_eq!(view.progress.approved, 1);
    assert_eq!(view.progress.total_levels, 3);
    assert_eq!(
        view.actionable_step().and_then(|s| s.record_id.as_deref()),
        Some("ap-pro-2")
    );

    let err = orchestrator.request_detail("rq-missing").await.unwrap_err();
    assert!(matches!(err, ApprovalError::RequestNotFound { .. }));
}

#[tokio::test]
async fn test_approve_reconciles_with_backend() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;
    orchestrator.refresh_inbox().await.unwrap();

    let outcome = orchestrator
        .approve("ap-pro-2", Some("  Kinerja baik  "))
        .await
        .unwrap();

    assert_eq!(outcome.action, Action::Approve);
    assert_eq!(outcome.record.status, ApprovalStatus::Approved);
    assert!(api
        .calls()
        .contains(&Call::Approve("ap-pro-2".to_string(), Some("Kinerja baik".to_string()))));

    let view = outcome.request.expect("request reloaded");
    assert_eq!(
        view.progress.state,
        WorkflowState::AwaitingLevel {
            level: 3,
            role: "Director".to_string()
        }
    );

    let inbox: Vec<String> = orchestrator.inbox().await.into_iter().map(|i| i.id).collect();
    assert_eq!(inbox, vec!["ap-acc-1".to_string(), "ap-pro-3".to_string()]);
}

#[tokio::test]
async fn test_unknown_approval_refreshes_once_then_fails() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;

    let err = orchestrator.reject("ap-nope", None).await.unwrap_err();
    assert!(matches!(err, ApprovalError::ApprovalNotFound { ref id } if id == "ap-nope"));
    assert_eq!(api.calls(), vec![Call::Pending]);
    assert_eq!(api.decision_calls(), 0);
}

#[tokio::test]
async fn test_uncached_approval_found_after_refresh() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;

    // Nothing cached yet; the first decision pulls the inbox itself
    let outcome = orchestrator.reject("ap-pro-2", None).await.unwrap();
    assert_eq!(outcome.record.status, ApprovalStatus::Rejected);
    assert_eq!(api.calls()[0], Call::Pending);
    assert_eq!(
        outcome.request.map(|view| view.progress.state),
        Some(WorkflowState::Rejected { level: 2 })
    );
}

#[tokio::test]
async fn test_missing_contract_blocks_approval_locally() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;
    orchestrator.refresh_inbox().await.unwrap();

    let err = orchestrator.approve("ap-acc-1", None).await.unwrap_err();
    match &err {
        ApprovalError::PreconditionUnmet { id, message } => {
            assert_eq!(id, "ap-acc-1");
            assert!(message.contains("contract"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(api.decision_calls(), 0);
    assert!(!orchestrator.is_in_flight("ap-acc-1"));

    api.attach_document("rq-account", "contract");
    let outcome = orchestrator.approve("ap-acc-1", None).await.unwrap();
    assert_eq!(outcome.record.status, ApprovalStatus::Approved);
    assert_eq!(api.decision_calls(), 1);
}

#[tokio::test]
async fn test_reject_ignores_contract_precondition() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;

    let outcome = orchestrator
        .reject("ap-acc-1", Some("Kontrak belum ada"))
        .await
        .unwrap();
    assert_eq!(outcome.record.status, ApprovalStatus::Rejected);
    assert_eq!(outcome.record.comments.as_deref(), Some("Kontrak belum ada"));
}

#[tokio::test]
async fn test_backend_rejection_leaves_cache_unchanged() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;
    let before = orchestrator.refresh_inbox().await.unwrap();

    api.fail_decisions(403, "Anda bukan approver untuk level ini");
    let err = orchestrator.approve("ap-pro-2", None).await.unwrap_err();

    assert_eq!(err.to_string(), "Anda bukan approver untuk level ini");
    assert!(err.is_backend_rejection());
    assert_eq!(orchestrator.inbox().await, before);
    assert!(!orchestrator.is_in_flight("ap-pro-2"));
    assert_eq!(
        api.record("ap-pro-2").map(|r| r.status),
        Some(ApprovalStatus::Pending)
    );
    // No reconciliation fetch after a failed command
    assert_eq!(api.calls().last(), Some(&Call::Approve("ap-pro-2".to_string(), None)));
}

#[tokio::test]
async fn test_decided_item_cannot_be_decided_again() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    let orchestrator = orchestrator(api.clone()).await;
    orchestrator.refresh_inbox().await.unwrap();
    orchestrator.reject("ap-pro-2", None).await.unwrap();

    // The backend no longer lists it; a stale id cannot be decided again
    let err = orchestrator.approve("ap-pro-2", None).await.unwrap_err();
    assert!(matches!(err, ApprovalError::ApprovalNotFound { .. }));
    assert_eq!(api.decision_calls(), 1);
}

#[tokio::test]
async fn test_stale_listing_is_not_pending() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    api.list_decided();
    let orchestrator = orchestrator(api.clone()).await;

    let err = orchestrator.approve("ap-pro-1", None).await.unwrap_err();
    match err {
        ApprovalError::NotPending { id, status } => {
            assert_eq!(id, "ap-pro-1");
            assert_eq!(status, ApprovalStatus::Approved);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(api.decision_calls(), 0);
}

#[tokio::test]
async fn test_failed_reload_still_reports_success() {
    let api = Arc::new(FakeApi::new(vec![request(
        "rq-t",
        "termination",
        vec![record("ap-t-1", 1, ApprovalStatus::Pending)],
    )]));
    let orchestrator = orchestrator(api.clone()).await;
    orchestrator.refresh_inbox().await.unwrap();

    api.fail_reloads();
    let outcome = orchestrator.approve("ap-t-1", None).await.unwrap();
    assert_eq!(outcome.record.status, ApprovalStatus::Approved);
    assert!(outcome.request.is_none());
}

#[tokio::test]
async fn test_double_submit_is_refused() {
    let release = Arc::new(Notify::new());
    let api = Arc::new(FakeApi::new(sample_requests()).holding_decisions(release.clone()));
    let orchestrator = Arc::new(orchestrator(api.clone()).await);
    orchestrator.refresh_inbox().await.unwrap();

    let first = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.approve("ap-pro-2", None).await })
    };
    while !orchestrator.is_in_flight("ap-pro-2") || api.decision_calls() == 0 {
        tokio::task::yield_now().await;
    }

    let err = orchestrator.approve("ap-pro-2", None).await.unwrap_err();
    assert!(matches!(err, ApprovalError::ActionInFlight { .. }));

    release.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert_eq!(outcome.record.status, ApprovalStatus::Approved);
    assert!(!orchestrator.is_in_flight("ap-pro-2"));
    assert_eq!(api.decision_calls(), 1);
}

#[tokio::test]
async fn test_level_after_rejection_is_refused_locally() {
    let api = Arc::new(FakeApi::new(vec![request(
        "rq-promo",
        "promotion",
        vec![
            record("ap-1", 1, ApprovalStatus::Approved),
            record("ap-2", 2, ApprovalStatus::Rejected),
            record("ap-3", 3, ApprovalStatus::Pending),
        ],
    )]));
    // The backend still lists the level 3 record as pending
    api.list_decided();
    let orchestrator = orchestrator(api.clone()).await;

    for action in [Action::Approve, Action::Reject] {
        let result = match action {
            Action::Approve => orchestrator.approve("ap-3", None).await,
            Action::Reject => orchestrator.reject("ap-3", None).await,
        };
        match result.unwrap_err() {
            ApprovalError::NotActionable { id, state } => {
                assert_eq!(id, "ap-3");
                assert_eq!(state, WorkflowState::Rejected { level: 2 });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(api.decision_calls(), 0);
    assert!(!orchestrator.is_in_flight("ap-3"));
}

#[tokio::test]
async fn test_only_current_level_is_actionable() {
    let api = Arc::new(FakeApi::new(sample_requests()));
    api.list_decided();
    let orchestrator = orchestrator(api.clone()).await;

    let err = orchestrator.reject("ap-pro-3", None).await.unwrap_err();
    match err {
        ApprovalError::NotActionable { state, .. } => assert_eq!(
            state,
            WorkflowState::AwaitingLevel {
                level: 2,
                role: "Manager HR".to_string()
            }
        ),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(api.decision_calls(), 0);

    let outcome = orchestrator.reject("ap-pro-2", None).await.unwrap();
    assert_eq!(outcome.record.status, ApprovalStatus::Rejected);
}

#[tokio::test]
async fn test_transport_failure_is_surfaced_without_retry() {
    let reads = Arc::new(FakeApi::new(sample_requests()));
    let writes = HttpApprovalApi::new(&ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        session_cookie: None,
        timeout_secs: 5,
    })
    .unwrap();
    let orchestrator = OrchestratorBuilder::new()
        .with_catalog(WorkflowCatalog::builtin())
        .with_api(Arc::new(UnreachableDecisions {
            reads: reads.clone(),
            writes,
        }))
        .build()
        .await
        .unwrap();
    let before = orchestrator.refresh_inbox().await.unwrap();
    let calls_before = reads.calls().len();

    let err = orchestrator.approve("ap-pro-2", None).await.unwrap_err();
    assert!(matches!(err, ApprovalError::Transport { .. }));
    assert!(!err.is_backend_rejection());
    assert!(!orchestrator.is_in_flight("ap-pro-2"));
    assert_eq!(orchestrator.inbox().await, before);
    // Only the request fetch before sending; no refresh, no reload
    assert_eq!(
        reads.calls()[calls_before..].to_vec(),
        vec![Call::Request("rq-promo".to_string())]
    );
    assert_eq!(
        reads.record("ap-pro-2").map(|r| r.status),
        Some(ApprovalStatus::Pending)
    );
}
