//! Schema of the versions data source
//!
//! The output exists in two representations: a nested `metadata` object and a
//! `raw_metadata` JSON string. Both are declared here; the encoder in use picks
//! which one appears in the data source schema.

use crate::schema::types::{Attribute, AttributeType, NestedObject, Schema};

/// Suffix appended to the provider type name to form the data source type name
pub const TYPE_NAME_SUFFIX: &str = "_versions";

/// Attribute names
pub mod attr {
    pub const PACKAGE: &str = "package";
    pub const METADATA: &str = "metadata";
    pub const RAW_METADATA: &str = "raw_metadata";

    pub const EOL_VERSIONS: &str = "eol_versions";
    pub const LAST_UPDATED_TIMESTAMP: &str = "last_updated_timestamp";
    pub const LATEST_VERSION: &str = "latest_version";
    pub const VERSIONS: &str = "versions";

    pub const EOL_DATE: &str = "eol_date";
    pub const EXISTS: &str = "exists";
    pub const FIPS: &str = "fips";
    pub const LTS: &str = "lts";
    pub const RELEASE_DATE: &str = "release_date";
    pub const VERSION: &str = "version";
}

pub fn package_attribute() -> Attribute {
    Attribute::string()
        .required()
        .with_description("The name of the package to lookup")
}

/// One release of a package
pub fn version_entry_object() -> NestedObject {
    NestedObject::new()
        .with_attribute(attr::EOL_DATE, Attribute::string().required())
        .with_attribute(attr::EXISTS, Attribute::bool().required())
        .with_attribute(attr::FIPS, Attribute::bool().required())
        .with_attribute(attr::LTS, Attribute::string().required())
        .with_attribute(attr::RELEASE_DATE, Attribute::string().required())
        .with_attribute(attr::VERSION, Attribute::string().required())
}

pub fn version_list_attribute() -> Attribute {
    Attribute::list_nested(version_entry_object()).required()
}

pub fn metadata_object() -> NestedObject {
    NestedObject::new()
        .with_attribute(attr::EOL_VERSIONS, version_list_attribute())
        .with_attribute(
            attr::LAST_UPDATED_TIMESTAMP,
            Attribute::string().required(),
        )
        .with_attribute(attr::LATEST_VERSION, Attribute::string().required())
        .with_attribute(attr::VERSIONS, version_list_attribute())
}

pub fn metadata_attribute() -> Attribute {
    Attribute::single_nested(metadata_object())
        .computed()
        .with_description("Version and end-of-life metadata for the package")
}

pub fn raw_metadata_attribute() -> Attribute {
    Attribute::string()
        .computed()
        .with_description("Version and end-of-life metadata for the package, as JSON")
}

pub fn version_entry_type() -> AttributeType {
    version_entry_object().value_type()
}

pub fn metadata_type() -> AttributeType {
    metadata_object().value_type()
}

/// Full data source schema with the given output attribute
pub fn versions_schema(output_name: &str, output: Attribute) -> Schema {
    Schema::new("Lookup version metadata for the given package name.")
        .with_attribute(attr::PACKAGE, package_attribute())
        .with_attribute(output_name, output)
}
