//! Error types for the approval workflow library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::{models::ApprovalStatus, progress::WorkflowState};

/// Comprehensive error type for all approval workflow operations.
///
/// Catalog lookups and projections never produce these; only configuration
/// loading and the network-bound orchestrator commands can fail.
#[derive(Error, Debug)]
pub enum ApprovalError {
    /// The Approval API answered with a non-success status. The message is
    /// the backend's own wording and is surfaced verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request never produced a usable response
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// The Approval API returned a body that does not match the contract
    #[error("Invalid payload from approval API: {reason}")]
    InvalidPayload { reason: String },
    /// Approval not present in the approver's inbox
    #[error("Approval with ID {id} not found")]
    ApprovalNotFound { id: String },
    /// Request not found for the given ID
    #[error("Request with ID {id} not found")]
    RequestNotFound { id: String },
    /// The approval was already decided
    #[error("Approval {id} is already {status} and cannot be changed")]
    NotPending { id: String, status: ApprovalStatus },
    /// The approval is pending but its request is not waiting on it, either
    /// because an earlier level rejected the request or another level is
    /// current
    #[error("Approval {id} cannot be decided now: the request is {state}")]
    NotActionable { id: String, state: WorkflowState },
    /// A required side artifact is missing for this level
    #[error("{message}")]
    PreconditionUnmet { id: String, message: String },
    /// A command for this approval has not completed yet
    #[error("A decision for approval {id} is already being submitted")]
    ActionInFlight { id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ApprovalError {
        ApprovalError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ApprovalError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a transport error wrapping a reqwest failure.
    pub fn transport(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            message: message.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error came back from the backend rather than from a
    /// local check or the network.
    pub fn is_backend_rejection(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

/// Extension trait for Result to map arbitrary errors into configuration
/// errors with context.
pub trait ConfigResultExt<T> {
    /// Map the error into a configuration error with a message.
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| ApprovalError::Configuration {
            message: format!("{context}: {e}"),
        })
    }
}

/// Result type alias for approval workflow operations
pub type Result<T> = std::result::Result<T, ApprovalError>;
