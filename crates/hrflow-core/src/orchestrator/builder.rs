//! Builder for creating and configuring Orchestrator instances.

use std::sync::Arc;

use log::debug;
use tokio::task;

use super::Orchestrator;
use crate::{
    api::{ApprovalApi, HttpApprovalApi},
    catalog::WorkflowCatalog,
    config::HrflowConfig,
    error::{ApprovalError, Result},
};

/// Builder for creating and configuring Orchestrator instances.
///
/// Anything not supplied explicitly is derived from the configuration: the
/// catalog from `workflows_file` (or the built-in table), the API client from
/// `api`.
#[derive(Default)]
pub struct OrchestratorBuilder {
    config: Option<HrflowConfig>,
    catalog: Option<WorkflowCatalog>,
    api: Option<Arc<dyn ApprovalApi>>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given configuration instead of the defaults.
    pub fn with_config(mut self, config: HrflowConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses an explicit catalog, ignoring `workflows_file`.
    pub fn with_catalog(mut self, catalog: WorkflowCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Uses an explicit API implementation instead of the HTTP client.
    pub fn with_api(mut self, api: Arc<dyn ApprovalApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Builds the configured orchestrator instance.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::FileSystem` if the catalog file cannot be read
    /// Returns `ApprovalError::Configuration` if the catalog is invalid
    /// Returns `ApprovalError::Transport` if the HTTP client cannot be created
    pub async fn build(self) -> Result<Orchestrator> {
        let config = self.config.unwrap_or_default();

        let catalog = match (self.catalog, config.workflows_file.clone()) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => task::spawn_blocking(move || WorkflowCatalog::load(&path))
                .await
                .map_err(|e| ApprovalError::Configuration {
                    message: format!("Task join error: {e}"),
                })??,
            (None, None) => WorkflowCatalog::builtin(),
        };
        debug!("Catalog ready with {} workflows", catalog.workflows().count());

        let api: Arc<dyn ApprovalApi> = match self.api {
            Some(api) => api,
            None => {
                let http = HttpApprovalApi::new(&config.api)?;
                debug!("Using Approval API at {}", http.base_url());
                Arc::new(http)
            }
        };

        Ok(Orchestrator::new(api, Arc::new(catalog)))
    }
}
