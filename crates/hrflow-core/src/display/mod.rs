//! Markdown presentation of workflows, inbox items and requests.
//!
//! Domain models carry their own `Display` impls (see [`models`]); wrappers
//! in this module add collection handling and command results on top. All
//! output is markdown so the CLI can render it with termimad and the MCP
//! server can return it as-is.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (steps, inbox)  │───▶│ Result Types    │───▶│  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use hrflow_core::{display::StepList, projector, WorkflowCatalog};
//!
//! let catalog = WorkflowCatalog::builtin();
//! let steps = projector::project_preview(&catalog, "account_request");
//! let output = StepList(steps).to_string();
//! assert!(output.contains("Manager HR"));
//! assert!(output.contains("○ Pending"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{InboxList, StepList, WorkflowList};
pub use datetime::LocalDateTime;
pub use results::{DecisionResult, WorkflowPreview};
pub use status::OperationStatus;
