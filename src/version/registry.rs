//! Registry trait for fetching package version metadata

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::VersionMetadataResponse;

/// Trait for the registry service of record
///
/// Implementations are shared across concurrent reads and must not serialize
/// access internally.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches version metadata for a package
    ///
    /// # Arguments
    /// * `package_name` - The package name, used as the only filter criterion
    ///
    /// # Returns
    /// * `Ok(VersionMetadataResponse)` - The registry's answer, fields unvalidated
    /// * `Err(RegistryError)` - If the call fails for any reason
    async fn get_package_version_metadata(
        &self,
        package_name: &str,
    ) -> Result<VersionMetadataResponse, RegistryError>;
}
