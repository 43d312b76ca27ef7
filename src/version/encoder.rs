//! Metadata encoder trait
//!
//! [`VersionMetadata`] is the canonical in-memory shape. An encoder is the last
//! step of a read and decides how that shape is exposed to the host: as a
//! nested typed object or as an opaque JSON string.

use crate::schema::{Attribute, AttributeValue};
use crate::version::error::EncodeError;
use crate::version::types::VersionMetadata;

/// Trait for turning version metadata into the data source's output attribute
pub trait MetadataEncoder: Send + Sync {
    /// Name of the output attribute in the data source schema
    fn attribute_name(&self) -> &'static str;

    /// Declaration of the output attribute
    fn attribute(&self) -> Attribute;

    /// Encode metadata into a value of [`Self::attribute`]'s type
    fn encode(&self, metadata: &VersionMetadata) -> Result<AttributeValue, EncodeError>;
}
