//! Workflow catalog: the static table from request type to approval chain.
//!
//! The catalog is advisory display metadata. The backend decides who may
//! approve what, so every lookup here degrades to an empty or identity answer
//! instead of failing:
//!
//! | lookup                 | unknown request type / level |
//! |------------------------|------------------------------|
//! | [`WorkflowCatalog::chain_for`]          | empty slice    |
//! | [`WorkflowCatalog::name_for`]           | input unchanged |
//! | [`WorkflowCatalog::step_definition_at`] | `None`         |
//!
//! A catalog is built once, either from the built-in table or from a TOML
//! file, and shared by reference with the projector and the orchestrator.
//! Loading is the only fallible operation: a chain that does not start at 1,
//! skips a level or is empty is refused.
//!
//! ```rust
//! use hrflow_core::WorkflowCatalog;
//!
//! let catalog = WorkflowCatalog::builtin();
//! let chain = catalog.chain_for("account_request");
//! assert_eq!(chain.len(), 2);
//! assert_eq!(chain[0].approver_role, "Manager HR");
//! assert!(catalog.chain_for("sabbatical").is_empty());
//! assert_eq!(catalog.name_for("sabbatical"), "sabbatical");
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApprovalError, ConfigResultExt, Result},
    models::{HrRequest, RequestType, WorkflowChain, WorkflowStepDefinition},
};

/// An extra condition that must hold before a level may be approved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Precondition {
    /// The request must carry a document of this type.
    DocumentAttached { document_type: String },
}

impl Precondition {
    pub fn is_satisfied(&self, request: &HrRequest) -> bool {
        match self {
            Precondition::DocumentAttached { document_type } => {
                request.has_document(document_type)
            }
        }
    }

    /// Message shown to the approver when the condition does not hold.
    pub fn unmet_message(&self) -> String {
        match self {
            Precondition::DocumentAttached { document_type } => format!(
                "A {document_type} document must be attached to the request before it can be approved"
            ),
        }
    }
}

/// Binds a precondition to one `(request type, level, approver role)` cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreconditionRule {
    pub request_type: RequestType,
    pub level: u32,
    pub approver_role: String,
    #[serde(flatten)]
    pub precondition: Precondition,
}

/// On-disk layout of a catalog file.
#[derive(Debug, Default, Deserialize, Serialize)]
struct CatalogFile {
    #[serde(default)]
    workflows: Vec<WorkflowChain>,
    #[serde(default)]
    preconditions: Vec<PreconditionRule>,
}

/// Immutable registry of workflow chains and their preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCatalog {
    chains: BTreeMap<RequestType, WorkflowChain>,
    preconditions: Vec<PreconditionRule>,
}

impl WorkflowCatalog {
    /// Builds a catalog from explicit chains and rules, validating both.
    pub fn new(chains: Vec<WorkflowChain>, preconditions: Vec<PreconditionRule>) -> Result<Self> {
        let mut by_type = BTreeMap::new();
        for chain in chains {
            validate_chain(&chain)?;
            let request_type = chain.request_type;
            if by_type.insert(request_type, chain).is_some() {
                return Err(ApprovalError::configuration(format!(
                    "Workflow for '{}' is defined more than once",
                    request_type.as_str()
                )));
            }
        }

        for rule in &preconditions {
            let level_exists = by_type
                .get(&rule.request_type)
                .is_some_and(|chain| chain.steps.iter().any(|s| s.level == rule.level));
            if !level_exists {
                return Err(ApprovalError::configuration(format!(
                    "Precondition refers to level {} of '{}', which is not defined",
                    rule.level,
                    rule.request_type.as_str()
                )));
            }
        }

        Ok(Self {
            chains: by_type,
            preconditions,
        })
    }

    /// The standard HR workflows.
    pub fn builtin() -> Self {
        let hr_manager = || WorkflowStepDefinition::new(0, "Manager HR", "HR Manager Review");
        let director = || WorkflowStepDefinition::new(0, "Director", "Director Approval");

        let chain = |request_type, name: &str, steps: Vec<WorkflowStepDefinition>| WorkflowChain {
            request_type,
            name: name.to_string(),
            steps: steps
                .into_iter()
                .zip(1..)
                .map(|(step, level)| WorkflowStepDefinition { level, ..step })
                .collect(),
        };

        let chains = [
            chain(
                RequestType::AccountRequest,
                "Account Request Approval",
                vec![hr_manager(), director()],
            ),
            chain(
                RequestType::Promotion,
                "Promotion Approval",
                vec![
                    WorkflowStepDefinition::new(0, "Supervisor", "Supervisor Recommendation"),
                    hr_manager(),
                    director(),
                ],
            ),
            chain(
                RequestType::Termination,
                "Termination Approval",
                vec![hr_manager(), director()],
            ),
            chain(
                RequestType::Transfer,
                "Transfer Approval",
                vec![
                    WorkflowStepDefinition::new(0, "Supervisor", "Current Supervisor Approval"),
                    hr_manager(),
                    director(),
                ],
            ),
            chain(
                RequestType::SalaryChange,
                "Salary Change Approval",
                vec![
                    hr_manager(),
                    WorkflowStepDefinition::new(0, "Finance Manager", "Finance Review"),
                    director(),
                ],
            ),
        ];

        let preconditions = vec![PreconditionRule {
            request_type: RequestType::AccountRequest,
            level: 1,
            approver_role: "Manager HR".to_string(),
            precondition: Precondition::DocumentAttached {
                document_type: "contract".to_string(),
            },
        }];

        Self {
            chains: chains
                .into_iter()
                .map(|chain| (chain.request_type, chain))
                .collect(),
            preconditions,
        }
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text).config_context("Invalid workflow catalog")?;
        Self::new(file.workflows, file.preconditions)
    }

    /// Loads a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ApprovalError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Loading workflow catalog from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Serializes the catalog back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        let file = CatalogFile {
            workflows: self.chains.values().cloned().collect(),
            preconditions: self.preconditions.clone(),
        };
        toml::to_string_pretty(&file).config_context("Failed to serialize workflow catalog")
    }

    /// Ordered approval chain for a request type; empty when unknown.
    pub fn chain_for(&self, request_type: &str) -> &[WorkflowStepDefinition] {
        match self.workflow(request_type) {
            Some(chain) => &chain.steps,
            None => {
                warn!("No workflow defined for request type '{request_type}'");
                &[]
            }
        }
    }

    /// Configured workflow name, or the input itself when unknown.
    pub fn name_for<'a>(&'a self, request_type: &'a str) -> &'a str {
        self.workflow(request_type)
            .map_or(request_type, |chain| chain.name.as_str())
    }

    /// Definition at `level` in the request type's chain.
    pub fn step_definition_at(
        &self,
        request_type: &str,
        level: u32,
    ) -> Option<&WorkflowStepDefinition> {
        self.chain_for(request_type)
            .iter()
            .find(|step| step.level == level)
    }

    /// Full chain including its name.
    pub fn workflow(&self, request_type: &str) -> Option<&WorkflowChain> {
        let request_type = request_type.parse::<RequestType>().ok()?;
        self.chains.get(&request_type)
    }

    /// All configured workflows in a stable order.
    pub fn workflows(&self) -> impl Iterator<Item = &WorkflowChain> {
        self.chains.values()
    }

    /// Preconditions attached to one level for one approver role.
    pub fn preconditions_for<'a>(
        &'a self,
        request_type: &str,
        level: u32,
        approver_role: &'a str,
    ) -> impl Iterator<Item = &'a Precondition> + 'a {
        let request_type = request_type.parse::<RequestType>().ok();
        self.preconditions
            .iter()
            .filter(move |rule| {
                Some(rule.request_type) == request_type
                    && rule.level == level
                    && rule.approver_role == approver_role
            })
            .map(|rule| &rule.precondition)
    }
}

impl Default for WorkflowCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_chain(chain: &WorkflowChain) -> Result<()> {
    let name = chain.request_type.as_str();
    if chain.steps.is_empty() {
        return Err(ApprovalError::configuration(format!(
            "Workflow for '{name}' has no steps"
        )));
    }
    for (expected, step) in (1..).zip(&chain.steps) {
        if step.level != expected {
            return Err(ApprovalError::configuration(format!(
                "Workflow for '{name}' expects level {expected} but found level {}",
                step.level
            )));
        }
    }
    Ok(())
}
