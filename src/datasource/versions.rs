//! Versions data source
//!
//! Resolves version metadata for one package per read. Each read makes exactly
//! one registry call and ends either `Mapped` (state is set) or `Failed` (a
//! diagnostic is returned and no state is set). Reads share nothing but the
//! registry client, so any number of them may run concurrently.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{FailurePolicy, VersionsSettings};
use crate::datasource::diagnostics::{Diagnostic, DiagnosticKind};
use crate::datasource::provider::ProviderData;
use crate::schema::versions::{self, TYPE_NAME_SUFFIX, attr};
use crate::schema::{AttributeValue, Schema};
use crate::version::encoder::MetadataEncoder;
use crate::version::encoders::encoder_for;
use crate::version::error::{EncodeError, RegistryError};
use crate::version::registry::Registry;
use crate::version::types::VersionMetadata;

/// Configuration values supplied by the host for one read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub config: AttributeValue,
}

impl ReadRequest {
    pub fn for_package(package: &str) -> Self {
        Self {
            config: AttributeValue::object([(attr::PACKAGE, AttributeValue::string(package))]),
        }
    }
}

/// Result of a read: either state or error diagnostics, never both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadResponse {
    pub state: Option<AttributeValue>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadResponse {
    fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    pub fn has_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Terminal state of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Mapped(VersionMetadata),
    Failed(Diagnostic),
}

/// Input model decoded from the read configuration
struct VersionsModel {
    package: String,
}

impl VersionsModel {
    fn from_config(schema: &Schema, config: &AttributeValue) -> Result<Self, Vec<Diagnostic>> {
        let missing = schema.missing_required(config);
        if !missing.is_empty() {
            return Err(missing
                .into_iter()
                .map(|name| {
                    Diagnostic::error(
                        DiagnosticKind::InputError,
                        "Missing required attribute",
                        format!("The attribute \"{}\" is required and must not be empty", name),
                    )
                })
                .collect());
        }

        match config.get(attr::PACKAGE).and_then(AttributeValue::as_str) {
            Some(package) => Ok(Self {
                package: package.to_string(),
            }),
            None => Err(vec![Diagnostic::error(
                DiagnosticKind::InputError,
                "Invalid attribute type",
                format!("The attribute \"{}\" must be a string", attr::PACKAGE),
            )]),
        }
    }

    fn input_params(&self) -> String {
        format!("[package={}]", self.package)
    }
}

pub struct VersionsDataSource {
    provider: Option<ProviderData>,
    settings: VersionsSettings,
    encoder: Arc<dyn MetadataEncoder>,
}

impl VersionsDataSource {
    pub fn new(settings: VersionsSettings) -> Self {
        Self {
            provider: None,
            settings,
            encoder: encoder_for(settings.encoding),
        }
    }

    /// Data source type name for the given provider
    pub fn type_name(provider_type_name: &str) -> String {
        format!("{}{}", provider_type_name, TYPE_NAME_SUFFIX)
    }

    /// Hand the data source its provider. Reads before this fail without
    /// contacting the registry.
    pub fn configure(&mut self, provider: ProviderData) {
        self.provider = Some(provider);
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn schema(&self) -> Schema {
        versions::versions_schema(self.encoder.attribute_name(), self.encoder.attribute())
    }

    /// Look up and map metadata for one package
    ///
    /// Remote failures become a `RemoteError` diagnostic, or the sentinel
    /// metadata under [`FailurePolicy::Sentinel`]. Mapping failures, including
    /// bodies that fail to decode, are always reported.
    pub async fn resolve(&self, registry: &dyn Registry, package: &str) -> Resolution {
        let response = match registry.get_package_version_metadata(package).await {
            Ok(response) => response,
            Err(RegistryError::Mapping(e)) => {
                error!("Failed to map package version metadata for {}: {}", package, e);
                return Resolution::Failed(Diagnostic::mapping(&e));
            }
            Err(e) => {
                return match self.settings.failure_policy {
                    FailurePolicy::Strict => {
                        error!(
                            "Failed to get package version metadata for {}: {}",
                            package, e
                        );
                        Resolution::Failed(Diagnostic::remote(&e))
                    }
                    FailurePolicy::Sentinel => {
                        warn!(
                            "Failed to get package version metadata for {}: {}. Using placeholder metadata.",
                            package, e
                        );
                        Resolution::Mapped(VersionMetadata::sentinel())
                    }
                };
            }
        };

        match VersionMetadata::try_from(response) {
            Ok(metadata) if metadata.is_empty() => {
                debug!("Registry knows no versions for {}", package);
                Resolution::Mapped(metadata)
            }
            Ok(metadata) => {
                debug!(
                    "Mapped {} versions and {} eol versions for {}",
                    metadata.versions.len(),
                    metadata.eol_versions.len(),
                    package
                );
                Resolution::Mapped(metadata)
            }
            Err(e) => {
                error!("Failed to map package version metadata for {}: {}", package, e);
                Resolution::Failed(Diagnostic::mapping(&e))
            }
        }
    }

    pub async fn read(&self, request: ReadRequest) -> ReadResponse {
        let schema = self.schema();
        let model = match VersionsModel::from_config(&schema, &request.config) {
            Ok(model) => model,
            Err(diagnostics) => return ReadResponse::failed(diagnostics),
        };
        info!("read versions data-source request: package={}", model.package);

        let Some(provider) = &self.provider else {
            return ReadResponse::failed(vec![
                Diagnostic::error(
                    DiagnosticKind::NotConfigured,
                    "Unconfigured data source",
                    "The provider has not been configured; no registry client is available",
                )
                .with_input(model.input_params()),
            ]);
        };

        let metadata = match self.resolve(provider.registry().as_ref(), &model.package).await {
            Resolution::Mapped(metadata) => metadata,
            Resolution::Failed(diagnostic) => {
                return ReadResponse::failed(vec![diagnostic.with_input(model.input_params())]);
            }
        };

        match self.state(&schema, &model, &metadata) {
            Ok(state) => ReadResponse {
                state: Some(state),
                diagnostics: Vec::new(),
            },
            Err(e) => {
                error!("Failed to encode metadata for {}: {}", model.package, e);
                ReadResponse::failed(vec![
                    Diagnostic::encoding(&e).with_input(model.input_params()),
                ])
            }
        }
    }

    /// Read several packages concurrently. Each read is independent; a failure
    /// only affects its own response.
    pub async fn read_many(&self, packages: &[String]) -> Vec<(String, ReadResponse)> {
        let reads = packages.iter().map(|package| async move {
            let response = self.read(ReadRequest::for_package(package)).await;
            (package.clone(), response)
        });

        join_all(reads).await
    }

    fn state(
        &self,
        schema: &Schema,
        model: &VersionsModel,
        metadata: &VersionMetadata,
    ) -> Result<AttributeValue, EncodeError> {
        let output = self.encoder.encode(metadata)?;
        let state = AttributeValue::object([
            (attr::PACKAGE, AttributeValue::string(&model.package)),
            (self.encoder.attribute_name(), output),
        ]);

        state.conforms_to(&schema.value_type())?;
        Ok(state)
    }
}
