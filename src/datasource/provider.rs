//! Provider-level data shared by every data source read

use std::sync::Arc;

use tracing::info;

use crate::config::RegistrySettings;
use crate::version::error::RegistryError;
use crate::version::registries::HttpRegistry;
use crate::version::registry::Registry;

/// Type name of the provider, prefixed to data source type names
pub const PROVIDER_TYPE_NAME: &str = "registry";

/// Handle passed to data sources when the host configures the provider
///
/// Cheap to clone. The registry client is shared by all concurrent reads.
#[derive(Clone)]
pub struct ProviderData {
    registry: Arc<dyn Registry>,
}

impl ProviderData {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// Build provider data backed by the HTTP registry client
    pub fn from_settings(settings: &RegistrySettings) -> Result<Self, RegistryError> {
        let registry = HttpRegistry::from_settings(settings)?;
        info!("Registry client configured for {}", settings.base_url);
        Ok(Self::new(Arc::new(registry)))
    }

    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }
}
