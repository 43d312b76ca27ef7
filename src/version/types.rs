//! Version metadata types
//!
//! Two layers live here:
//!
//! - wire types ([`VersionMetadataResponse`], [`VersionEntryResponse`]) that accept
//!   whatever the registry sends, in either `camelCase` or `snake_case`, and keep
//!   track of fields that were explicitly `null`
//! - canonical types ([`VersionMetadata`], [`VersionEntry`]) that are fully
//!   populated and are what the encoders consume
//!
//! Conversion from wire to canonical goes through [`TryFrom`] and fails with a
//! [`MappingError`] naming the offending attribute path.

use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::versions::attr;
use crate::version::error::MappingError;

/// One release of a package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub version: String,
    /// Whether the version is currently installable
    pub exists: bool,
    /// Whether this entry is the FIPS build of the version
    pub fips: bool,
    /// Long-term-support channel; empty when the version is not LTS
    pub lts: String,
    pub release_date: String,
    /// Empty when no end-of-life has been announced
    pub eol_date: String,
}

/// Version and lifecycle metadata for a single package
///
/// Built fresh for every read and never mutated afterwards. List order is the
/// registry's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    pub last_updated_timestamp: String,
    pub latest_version: String,
    pub eol_versions: Vec<VersionEntry>,
    pub versions: Vec<VersionEntry>,
}

impl VersionMetadata {
    /// Placeholder returned in place of a failed lookup when the sentinel
    /// failure policy is selected
    pub fn sentinel() -> Self {
        Self {
            last_updated_timestamp: String::new(),
            latest_version: String::new(),
            eol_versions: Vec::new(),
            versions: vec![VersionEntry {
                exists: true,
                ..Default::default()
            }],
        }
    }

    /// True when the registry knows no versions for the package
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty() && self.eol_versions.is_empty()
    }
}

/// A field as it appeared on the wire
///
/// Absent fields follow proto3 JSON conventions and fall back to the type's
/// default. An explicit `null` is kept apart so the mapping step can reject it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireField<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for WireField<T> {
    fn default() -> Self {
        WireField::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for WireField<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => WireField::Value(value),
            None => WireField::Null,
        })
    }
}

impl<T: Default> WireField<T> {
    fn require(self, path: impl FnOnce() -> String) -> Result<T, MappingError> {
        match self {
            WireField::Absent => Ok(T::default()),
            WireField::Null => Err(MappingError::NullField { path: path() }),
            WireField::Value(value) => Ok(value),
        }
    }
}

impl<T> From<T> for WireField<T> {
    fn from(value: T) -> Self {
        WireField::Value(value)
    }
}

/// Version entry as returned by the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionEntryResponse {
    pub version: WireField<String>,
    pub exists: WireField<bool>,
    pub fips: WireField<bool>,
    pub lts: WireField<String>,
    #[serde(alias = "release_date")]
    pub release_date: WireField<String>,
    #[serde(alias = "eol_date")]
    pub eol_date: WireField<String>,
}

/// Package version metadata as returned by the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionMetadataResponse {
    #[serde(alias = "last_updated_timestamp")]
    pub last_updated_timestamp: WireField<String>,
    #[serde(alias = "latest_version")]
    pub latest_version: WireField<String>,
    #[serde(alias = "eol_versions")]
    pub eol_versions: WireField<Vec<WireField<VersionEntryResponse>>>,
    pub versions: WireField<Vec<WireField<VersionEntryResponse>>>,
}

fn map_entries(
    list: &str,
    entries: WireField<Vec<WireField<VersionEntryResponse>>>,
) -> Result<Vec<VersionEntry>, MappingError> {
    entries
        .require(|| list.to_string())?
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let prefix = format!("{}[{}]", list, i);
            let entry = entry.require(|| prefix.clone())?;
            entry_from_response(&prefix, entry)
        })
        .collect()
}

fn entry_from_response(
    prefix: &str,
    entry: VersionEntryResponse,
) -> Result<VersionEntry, MappingError> {
    let path = |name: &str| format!("{}.{}", prefix, name);

    Ok(VersionEntry {
        version: entry.version.require(|| path(attr::VERSION))?,
        exists: entry.exists.require(|| path(attr::EXISTS))?,
        fips: entry.fips.require(|| path(attr::FIPS))?,
        lts: entry.lts.require(|| path(attr::LTS))?,
        release_date: entry.release_date.require(|| path(attr::RELEASE_DATE))?,
        eol_date: entry.eol_date.require(|| path(attr::EOL_DATE))?,
    })
}

impl TryFrom<VersionMetadataResponse> for VersionMetadata {
    type Error = MappingError;

    fn try_from(response: VersionMetadataResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            last_updated_timestamp: response
                .last_updated_timestamp
                .require(|| attr::LAST_UPDATED_TIMESTAMP.to_string())?,
            latest_version: response
                .latest_version
                .require(|| attr::LATEST_VERSION.to_string())?,
            eol_versions: map_entries(attr::EOL_VERSIONS, response.eol_versions)?,
            versions: map_entries(attr::VERSIONS, response.versions)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(body: &str) -> Result<VersionMetadata, MappingError> {
        let response: VersionMetadataResponse = serde_json::from_str(body).unwrap();
        VersionMetadata::try_from(response)
    }

    #[test]
    fn camel_case_and_snake_case_responses_map_to_same_metadata() {
        let camel = parse(
            r#"{
                "lastUpdatedTimestamp": "2024-05-01T00:00:00Z",
                "latestVersion": "1.2.0",
                "versions": [
                    {"version": "1.2.0", "exists": true, "fips": false, "lts": "", "releaseDate": "2024-01-01", "eolDate": ""}
                ],
                "eolVersions": [
                    {"version": "1.0.0", "exists": true, "fips": true, "lts": "", "releaseDate": "2023-01-01", "eolDate": "2024-01-01"}
                ]
            }"#,
        )
        .unwrap();
        let snake = parse(
            r#"{
                "last_updated_timestamp": "2024-05-01T00:00:00Z",
                "latest_version": "1.2.0",
                "versions": [
                    {"version": "1.2.0", "exists": true, "fips": false, "lts": "", "release_date": "2024-01-01", "eol_date": ""}
                ],
                "eol_versions": [
                    {"version": "1.0.0", "exists": true, "fips": true, "lts": "", "release_date": "2023-01-01", "eol_date": "2024-01-01"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(camel, snake);
        assert_eq!(camel.eol_versions[0].eol_date, "2024-01-01");
        assert!(camel.eol_versions[0].fips);
    }

    #[test]
    fn absent_fields_take_defaults() {
        let metadata = parse(r#"{"versions": [{"version": "3.12"}]}"#).unwrap();

        assert_eq!(metadata.latest_version, "");
        assert_eq!(metadata.last_updated_timestamp, "");
        assert!(metadata.eol_versions.is_empty());
        assert_eq!(
            metadata.versions,
            vec![VersionEntry {
                version: "3.12".to_string(),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn empty_response_maps_to_empty_metadata() {
        let metadata = parse("{}").unwrap();

        assert_eq!(metadata, VersionMetadata::default());
        assert!(metadata.is_empty());
    }

    #[test]
    fn list_order_is_preserved() {
        let metadata = parse(
            r#"{"versions": [{"version": "2.0"}, {"version": "1.0"}, {"version": "3.0"}]}"#,
        )
        .unwrap();

        let order: Vec<&str> = metadata.versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(order, vec!["2.0", "1.0", "3.0"]);
    }

    #[rstest]
    #[case(r#"{"latestVersion": null}"#, "latest_version")]
    #[case(r#"{"last_updated_timestamp": null}"#, "last_updated_timestamp")]
    #[case(r#"{"versions": null}"#, "versions")]
    #[case(r#"{"versions": [{"version": "1"}, null]}"#, "versions[1]")]
    #[case(r#"{"eolVersions": [{"eolDate": null}]}"#, "eol_versions[0].eol_date")]
    #[case(r#"{"versions": [{"version": "1", "fips": null}]}"#, "versions[0].fips")]
    fn explicit_null_is_a_mapping_error(#[case] body: &str, #[case] expected_path: &str) {
        assert_eq!(
            parse(body),
            Err(MappingError::NullField {
                path: expected_path.to_string()
            })
        );
    }

    #[test]
    fn sentinel_has_single_existing_non_fips_entry() {
        let sentinel = VersionMetadata::sentinel();

        assert_eq!(sentinel.latest_version, "");
        assert_eq!(sentinel.last_updated_timestamp, "");
        assert!(sentinel.eol_versions.is_empty());
        assert_eq!(sentinel.versions.len(), 1);
        assert_eq!(sentinel.versions[0].version, "");
        assert!(sentinel.versions[0].exists);
        assert!(!sentinel.versions[0].fips);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(VersionMetadata::sentinel()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "lastUpdatedTimestamp": "",
                "latestVersion": "",
                "eolVersions": [],
                "versions": [{
                    "version": "",
                    "exists": true,
                    "fips": false,
                    "lts": "",
                    "releaseDate": "",
                    "eolDate": ""
                }]
            })
        );
    }
}
