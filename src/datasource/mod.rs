//! Data source layer exposed to the host
//!
//! This module handles the host-facing read cycle: decoding input, resolving
//! metadata through the registry, and returning state or diagnostics.
//!
//! # Modules
//!
//! - [`diagnostics`]: Structured errors returned to the host
//! - [`provider`]: Registry client handle supplied by the configure cycle
//! - [`versions`]: The versions data source and its resolver

pub mod diagnostics;
pub mod provider;
pub mod versions;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use provider::{PROVIDER_TYPE_NAME, ProviderData};
pub use versions::{ReadRequest, ReadResponse, Resolution, VersionsDataSource};
