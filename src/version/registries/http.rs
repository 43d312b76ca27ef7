//! Registry API implementation over HTTP/JSON

use std::time::Duration;

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::config::RegistrySettings;
use crate::version::error::{MappingError, RegistryError};
use crate::version::registry::Registry;
use crate::version::types::VersionMetadataResponse;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Registry implementation for the registry's HTTP/JSON gateway
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRegistry {
    pub fn from_settings(settings: &RegistrySettings) -> Result<Self, RegistryError> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            RegistryError::InvalidConfig(format!("invalid base URL {}: {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RegistryError::InvalidConfig(format!(
                "base URL {} cannot carry a path",
                settings.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &settings.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| RegistryError::InvalidConfig(format!("invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Metadata URL for a package; the name is a single percent-encoded path
    /// segment (origin/name -> origin%2Fname)
    fn metadata_url(&self, package_name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "registry",
                "v1",
                "packages",
                package_name,
                "versionmetadata",
            ]);
        }
        url
    }
}

#[async_trait::async_trait]
impl Registry for HttpRegistry {
    async fn get_package_version_metadata(
        &self,
        package_name: &str,
    ) -> Result<VersionMetadataResponse, RegistryError> {
        let url = self.metadata_url(package_name);
        debug!("Fetching package version metadata: {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RegistryError::Unauthorized(format!(
                "registry returned status {}",
                status
            )));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("Registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to decode package version metadata response: {}", e);
            RegistryError::Mapping(MappingError::from(e))
        })
    }
}
