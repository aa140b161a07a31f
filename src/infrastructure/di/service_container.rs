//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ProvisioningService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::connection::HostConnection;
use crate::infrastructure::rest::RestClient;
use crate::infrastructure::traits::OntapApi;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Cluster API client
    pub api: Arc<dyn OntapApi>,
}

impl ServiceContainer {
    /// Create a new service container talking to the cluster behind `connection`.
    pub fn new(settings: Settings, connection: &HostConnection) -> ApplicationResult<Self> {
        let api = RestClient::new(connection, &settings)?;
        Ok(Self::with_deps(settings, Arc::new(api)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, api: Arc<dyn OntapApi>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, api }
    }

    pub fn provisioning(&self) -> ProvisioningService {
        ProvisioningService::new(Arc::clone(&self.api), Arc::clone(&self.settings))
    }
}
