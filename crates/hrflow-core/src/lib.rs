//! Core library for hrflow, a multi-level HR approval workflow client.
//!
//! The crate is split into a pure core and a network-bound shell:
//!
//! - [`catalog`]: which roles approve which request type, in what order
//! - [`projector`]: turns backend approval records into display-ready steps
//! - [`progress`]: current level, terminal states and action gating
//! - [`orchestrator`]: the approver's inbox and approve/reject commands
//!   against an [`api::ApprovalApi`] backend
//!
//! The backend owns every approval record. This side reads them, derives
//! state from them, and asks the backend to make decisions.
//!
//! # Quick Start
//!
//! ```rust
//! use hrflow_core::{progress, projector, models::ApprovalRecord, WorkflowCatalog};
//!
//! let catalog = WorkflowCatalog::builtin();
//!
//! // What a new promotion request will go through
//! let preview = projector::project_preview(&catalog, "promotion");
//! assert_eq!(preview.len(), 3);
//!
//! // Where a submitted one stands
//! let records = vec![ApprovalRecord::pending("ap-1", 1)];
//! let steps = projector::project_submitted(&catalog, "promotion", &records);
//! assert_eq!(progress::current_level(&steps), Some(1));
//! ```
//!
//! Talking to a backend goes through the orchestrator:
//!
//! ```rust,no_run
//! use hrflow_core::{config::HrflowConfig, OrchestratorBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = OrchestratorBuilder::new()
//!     .with_config(HrflowConfig::default())
//!     .build()
//!     .await?;
//!
//! for item in orchestrator.refresh_inbox().await? {
//!     println!("{item}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod progress;
pub mod projector;

pub use catalog::WorkflowCatalog;
pub use config::HrflowConfig;
pub use display::{
    DecisionResult, InboxList, LocalDateTime, OperationStatus, StepList, WorkflowList,
    WorkflowPreview,
};
pub use error::{ApprovalError, Result};
pub use orchestrator::{DecisionOutcome, Orchestrator, OrchestratorBuilder, RequestView};
