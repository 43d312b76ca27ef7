//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use versions_source::config::VersionsSettings;
use versions_source::datasource::{ProviderData, VersionsDataSource};
use versions_source::version::error::RegistryError;
use versions_source::version::registry::Registry;
use versions_source::version::types::{VersionEntryResponse, VersionMetadataResponse, WireField};

/// Mock registry for testing
///
/// Packages without registered metadata fail with `NotFound`.
#[derive(Default)]
pub struct MockRegistry {
    metadata: HashMap<String, VersionMetadataResponse>,
    calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, package: &str, metadata: VersionMetadataResponse) -> Self {
        self.metadata.insert(package.to_string(), metadata);
        self
    }

    /// Number of registry calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn get_package_version_metadata(
        &self,
        package_name: &str,
    ) -> Result<VersionMetadataResponse, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.metadata.get(package_name) {
            Some(metadata) => Ok(metadata.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Build a version entry as the registry would return it
pub fn entry(
    version: &str,
    fips: bool,
    lts: &str,
    release_date: &str,
    eol_date: &str,
) -> VersionEntryResponse {
    VersionEntryResponse {
        version: version.to_string().into(),
        exists: true.into(),
        fips: fips.into(),
        lts: lts.to_string().into(),
        release_date: release_date.to_string().into(),
        eol_date: eol_date.to_string().into(),
    }
}

/// Build package metadata as the registry would return it
pub fn metadata(
    latest_version: &str,
    versions: Vec<VersionEntryResponse>,
    eol_versions: Vec<VersionEntryResponse>,
) -> VersionMetadataResponse {
    let wrap = |entries: Vec<VersionEntryResponse>| -> WireField<Vec<WireField<VersionEntryResponse>>> {
        entries.into_iter().map(WireField::Value).collect::<Vec<_>>().into()
    };

    VersionMetadataResponse {
        last_updated_timestamp: "2024-05-01T00:00:00Z".to_string().into(),
        latest_version: latest_version.to_string().into(),
        versions: wrap(versions),
        eol_versions: wrap(eol_versions),
    }
}

/// Create a configured data source backed by the given registry
pub fn create_test_data_source(
    settings: VersionsSettings,
    registry: Arc<MockRegistry>,
) -> VersionsDataSource {
    let mut data_source = VersionsDataSource::new(settings);
    data_source.configure(ProviderData::new(registry));
    data_source
}
