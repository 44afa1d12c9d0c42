//! HTTP implementation of the Approval API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use super::{payloads, ApprovalApi};
use crate::{
    config::ApiConfig,
    error::{ApprovalError, Result},
    models::{ApprovalRecord, HrRequest, PendingApproval},
    progress::Action,
};

/// Approval API client speaking JSON over HTTP.
///
/// The session cookie is forwarded as-is; how it was obtained is not this
/// client's concern.
pub struct HttpApprovalApi {
    client: Client,
    base_url: String,
    session_cookie: Option<SecretString>,
}

impl HttpApprovalApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApprovalError::transport("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_session(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie.expose_secret()),
            None => builder,
        }
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<(StatusCode, String)> {
        let response = self
            .with_session(builder)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApprovalError::transport(format!("Failed to {what}"), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                ApprovalError::transport(format!("Failed to read response to {what}"), e)
            })?;
        debug!("{what}: HTTP {status}");
        Ok((status, body))
    }

    async fn decide(
        &self,
        action: Action,
        approval_id: &str,
        comments: Option<&str>,
    ) -> Result<ApprovalRecord> {
        let url = self.url(&format!("/approvals/{approval_id}/{}", action.as_str()));
        let builder = self
            .client
            .post(url)
            .json(&payloads::DecisionBody { comments });
        let (status, body) = self.send(builder, &format!("{action} approval")).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApprovalError::ApprovalNotFound {
                id: approval_id.to_string(),
            });
        }
        check_status(status, &body)?;
        payloads::parse_approval_record(&body)
    }
}

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let fallback = status.canonical_reason().unwrap_or("Request failed");
    Err(ApprovalError::Api {
        status: status.as_u16(),
        message: payloads::error_message(body, fallback),
    })
}

#[async_trait]
impl ApprovalApi for HttpApprovalApi {
    async fn pending_approvals(&self) -> Result<Vec<PendingApproval>> {
        let builder = self.client.get(self.url("/approvals/pending"));
        let (status, body) = self.send(builder, "fetch pending approvals").await?;
        check_status(status, &body)?;
        payloads::parse_pending_approvals(&body)
    }

    async fn request(&self, request_id: &str) -> Result<HrRequest> {
        let builder = self.client.get(self.url(&format!("/requests/{request_id}")));
        let (status, body) = self.send(builder, "fetch request").await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApprovalError::RequestNotFound {
                id: request_id.to_string(),
            });
        }
        check_status(status, &body)?;
        payloads::parse_request(&body)
    }

    async fn approve(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord> {
        self.decide(Action::Approve, approval_id, comments).await
    }

    async fn reject(&self, approval_id: &str, comments: Option<&str>) -> Result<ApprovalRecord> {
        self.decide(Action::Reject, approval_id, comments).await
    }
}
