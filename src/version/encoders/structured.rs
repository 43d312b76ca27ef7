//! Nested object encoder

use crate::schema::versions::{self, attr};
use crate::schema::{Attribute, AttributeValue};
use crate::version::encoder::MetadataEncoder;
use crate::version::error::EncodeError;
use crate::version::types::{VersionEntry, VersionMetadata};

/// Encodes metadata as the `metadata` nested object
///
/// The result is checked against the declared type before it is returned, so a
/// drift between this mapping and the schema surfaces as an error instead of
/// a malformed state.
pub struct StructuredEncoder;

fn encode_entry(entry: &VersionEntry) -> AttributeValue {
    AttributeValue::object([
        (attr::EOL_DATE, AttributeValue::string(&entry.eol_date)),
        (attr::EXISTS, AttributeValue::Bool(entry.exists)),
        (attr::FIPS, AttributeValue::Bool(entry.fips)),
        (attr::LTS, AttributeValue::string(&entry.lts)),
        (attr::RELEASE_DATE, AttributeValue::string(&entry.release_date)),
        (attr::VERSION, AttributeValue::string(&entry.version)),
    ])
}

fn encode_entries(entries: &[VersionEntry]) -> AttributeValue {
    AttributeValue::list(
        versions::version_entry_type(),
        entries.iter().map(encode_entry).collect(),
    )
}

impl MetadataEncoder for StructuredEncoder {
    fn attribute_name(&self) -> &'static str {
        attr::METADATA
    }

    fn attribute(&self) -> Attribute {
        versions::metadata_attribute()
    }

    fn encode(&self, metadata: &VersionMetadata) -> Result<AttributeValue, EncodeError> {
        let value = AttributeValue::object([
            (attr::EOL_VERSIONS, encode_entries(&metadata.eol_versions)),
            (
                attr::LAST_UPDATED_TIMESTAMP,
                AttributeValue::string(&metadata.last_updated_timestamp),
            ),
            (
                attr::LATEST_VERSION,
                AttributeValue::string(&metadata.latest_version),
            ),
            (attr::VERSIONS, encode_entries(&metadata.versions)),
        ]);

        value.conforms_to(&versions::metadata_type())?;
        Ok(value)
    }
}
