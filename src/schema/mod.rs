//! Typed attribute schema and values
//!
//! # Modules
//!
//! - [`types`]: Attribute types and schema declarations
//! - [`value`]: Attribute values and type conformance checks
//! - [`versions`]: Schema of the versions data source

pub mod types;
pub mod value;
pub mod versions;

pub use types::{Attribute, AttributeKind, AttributeMode, AttributeType, NestedObject, Schema};
pub use value::{AttributeValue, TypeMismatch};
