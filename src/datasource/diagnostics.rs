//! Diagnostics returned to the host in place of state

use std::fmt;

use serde::Serialize;

use crate::version::error::{EncodeError, MappingError, RegistryError};

/// Machine-checkable category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A required input is missing or empty
    InputError,
    /// The registry call failed
    RemoteError,
    /// The registry response could not be mapped into the declared schema
    MappingError,
    /// Mapped metadata could not be encoded into the output attribute
    EncodeError,
    /// A read was attempted before the provider was configured
    NotConfigured,
}

/// A single structured, non-fatal error
///
/// Any diagnostic on a read means the read failed and produced no state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub summary: String,
    pub detail: String,
    /// Input parameters of the failed query, e.g. `[package=bazelx]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            summary: summary.into(),
            detail: detail.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn remote(err: &RegistryError) -> Self {
        Self::error(
            DiagnosticKind::RemoteError,
            "failed to get package version metadata",
            err.to_string(),
        )
    }

    pub fn mapping(err: &MappingError) -> Self {
        Self::error(
            DiagnosticKind::MappingError,
            "unable to map package version metadata",
            err.to_string(),
        )
    }

    pub fn encoding(err: &EncodeError) -> Self {
        Self::error(
            DiagnosticKind::EncodeError,
            "unable to convert package version metadata",
            err.to_string(),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.summary)?;
        if let Some(input) = &self.input {
            write!(f, " {}", input)?;
        }
        write!(f, ": {}", self.detail)
    }
}
