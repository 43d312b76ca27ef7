//! JSON string encoder

use crate::schema::versions::{self, attr};
use crate::schema::{Attribute, AttributeValue};
use crate::version::encoder::MetadataEncoder;
use crate::version::error::EncodeError;
use crate::version::types::VersionMetadata;

/// Encodes metadata as the `raw_metadata` JSON string
///
/// Keys use the registry's camelCase names. Consumers decode the string
/// themselves, so upstream field additions never break the schema.
pub struct RawJsonEncoder;

impl MetadataEncoder for RawJsonEncoder {
    fn attribute_name(&self) -> &'static str {
        attr::RAW_METADATA
    }

    fn attribute(&self) -> Attribute {
        versions::raw_metadata_attribute()
    }

    fn encode(&self, metadata: &VersionMetadata) -> Result<AttributeValue, EncodeError> {
        Ok(AttributeValue::String(serde_json::to_string(metadata)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeType;
    use crate::version::types::VersionEntry;

    #[test]
    fn encode_produces_json_string() {
        let metadata = VersionMetadata {
            latest_version: "3.12".to_string(),
            versions: vec![VersionEntry {
                version: "3.12".to_string(),
                exists: true,
                ..Default::default()
            }],
            ..Default::default()
        };

        let value = RawJsonEncoder.encode(&metadata).unwrap();
        let json: serde_json::Value = serde_json::from_str(value.as_str().unwrap()).unwrap();

        assert_eq!(json["latestVersion"], "3.12");
        assert_eq!(json["versions"][0]["version"], "3.12");
        assert_eq!(json["versions"][0]["exists"], true);
        assert_eq!(json["eolVersions"], serde_json::json!([]));
    }

    #[test]
    fn declared_attribute_is_string() {
        assert_eq!(RawJsonEncoder.attribute_name(), "raw_metadata");
        assert_eq!(RawJsonEncoder.attribute().value_type(), AttributeType::String);
    }
}
