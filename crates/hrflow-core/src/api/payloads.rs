//! Parsing and validation of Approval API payloads.
//!
//! Everything coming off the wire passes through here, so the projector and
//! orchestrator only ever see well-formed values: statuses are one of the
//! three known ones and levels start at 1.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{ApprovalError, Result},
    models::{ApprovalRecord, HrRequest, PendingApproval},
};

/// Body of an approve/reject command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DecisionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<&'a str>,
}

/// Some endpoints wrap their payload as `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApprovalError::InvalidPayload {
            reason: e.to_string(),
        })?;
    Ok(match envelope {
        Envelope::Wrapped { data } => data,
        Envelope::Bare(value) => value,
    })
}

fn check_level(id: &str, level: u32) -> Result<()> {
    if level == 0 {
        return Err(ApprovalError::InvalidPayload {
            reason: format!("approval {id} has level 0; levels start at 1"),
        });
    }
    Ok(())
}

/// Parses the body of `GET /approvals/pending`.
pub fn parse_pending_approvals(body: &str) -> Result<Vec<PendingApproval>> {
    let items: Vec<PendingApproval> = decode(body)?;
    for item in &items {
        check_level(&item.id, item.approval_level)?;
    }
    Ok(items)
}

/// Parses the body of `GET /requests/{id}`.
pub fn parse_request(body: &str) -> Result<HrRequest> {
    let request: HrRequest = decode(body)?;
    for record in &request.approvals {
        check_level(&record.id, record.approval_level)?;
    }
    Ok(request)
}

/// Parses the record returned by an approve/reject command.
pub fn parse_approval_record(body: &str) -> Result<ApprovalRecord> {
    let record: ApprovalRecord = decode(body)?;
    check_level(&record.id, record.approval_level)?;
    Ok(record)
}

/// Extracts the backend's own error message from a failed response.
///
/// Looks for `message` then `error`; falls back to the raw body and finally
/// to `fallback` when the body is empty.
pub fn error_message(body: &str, fallback: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
    });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => fallback.to_string(),
    }
}
