use thiserror::Error;

use crate::schema::TypeMismatch;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The registry answered, but the body does not fit the response model
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("unexpected null for required attribute {path}")]
    NullField { path: String },

    #[error("malformed response body: {message}")]
    Decode { message: String },
}

impl From<serde_json::Error> for MappingError {
    fn from(err: serde_json::Error) -> Self {
        MappingError::Decode {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Failed to serialize version metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    SchemaMismatch(#[from] TypeMismatch),
}
