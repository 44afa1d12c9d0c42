//! Data models for approval workflows.
//!
//! This module contains the domain types shared by the catalog, the step
//! projector and the orchestrator. Display implementations for these models
//! are located in [`crate::display::models`] to keep data structures separate
//! from presentation.
//!
//! # Model Groups
//!
//! - **Static definitions**: [`RequestType`], [`WorkflowStepDefinition`] and
//!   [`WorkflowChain`], owned by the catalog and never mutated at runtime.
//! - **Backend facts**: [`ApprovalRecord`], [`HrRequest`] and
//!   [`PendingApproval`], parsed from the Approval API and treated as
//!   read-only.
//! - **Derived views**: [`ProjectedStep`], recomputed from the two groups
//!   above whenever it is displayed.
//!
//! # Examples
//!
//! ```rust
//! use hrflow_core::models::{ApprovalRecord, ApprovalStatus};
//!
//! let record = ApprovalRecord::pending("a1", 1);
//! assert_eq!(record.status, ApprovalStatus::Pending);
//! assert!(!record.status.is_decided());
//! ```

pub mod record;
pub mod request;
pub mod status;
pub mod step;
pub mod workflow;


pub use record::{ApprovalRecord, Approver};
pub use request::{Document, HrRequest, PendingApproval, Person, RequestRef};
pub use status::{ApprovalStatus, RequestType};
pub use step::{ProjectedStep, NOT_AVAILABLE};
pub use workflow::{WorkflowChain, WorkflowStepDefinition};
