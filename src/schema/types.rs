//! Attribute schema description
//!
//! A [`Schema`] is a purely structural description: which attributes exist,
//! what type each has, and whether the host must supply it. It never inspects
//! data except for [`Schema::missing_required`], which is how required inputs
//! are enforced before a read runs.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::value::AttributeValue;

/// Type of an attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Bool,
    List(Box<AttributeType>),
    Object(IndexMap<String, AttributeType>),
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => write!(f, "string"),
            AttributeType::Bool => write!(f, "bool"),
            AttributeType::List(element) => write!(f, "list({})", element),
            AttributeType::Object(attributes) => {
                write!(f, "object({{")?;
                for (i, (name, ty)) in attributes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, ty)?;
                }
                write!(f, "}})")
            }
        }
    }
}

/// Who supplies an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeMode {
    /// Must be set by the configuration
    Required,
    /// May be set by the configuration
    Optional,
    /// Set by the data source during a read
    Computed,
}

/// Structural kind of an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Bool,
    /// A list whose elements are objects
    ListNested(NestedObject),
    /// A single nested object
    SingleNested(NestedObject),
}

/// Attributes of a nested object, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NestedObject {
    pub attributes: IndexMap<String, Attribute>,
}

impl NestedObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn value_type(&self) -> AttributeType {
        AttributeType::Object(
            self.attributes
                .iter()
                .map(|(name, attribute)| (name.clone(), attribute.value_type()))
                .collect(),
        )
    }
}

/// A single attribute declaration
///
/// # Examples
///
/// ```
/// use versions_source::schema::{Attribute, AttributeMode, AttributeType};
///
/// let package = Attribute::string()
///     .required()
///     .with_description("The name of the package to lookup");
/// assert_eq!(package.mode, AttributeMode::Required);
/// assert_eq!(package.value_type(), AttributeType::String);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mode: AttributeMode,
    #[serde(flatten)]
    pub kind: AttributeKind,
}

impl Attribute {
    fn new(kind: AttributeKind) -> Self {
        Self {
            description: None,
            mode: AttributeMode::Optional,
            kind,
        }
    }

    pub fn string() -> Self {
        Self::new(AttributeKind::String)
    }

    pub fn bool() -> Self {
        Self::new(AttributeKind::Bool)
    }

    pub fn list_nested(object: NestedObject) -> Self {
        Self::new(AttributeKind::ListNested(object))
    }

    pub fn single_nested(object: NestedObject) -> Self {
        Self::new(AttributeKind::SingleNested(object))
    }

    pub fn required(mut self) -> Self {
        self.mode = AttributeMode::Required;
        self
    }

    pub fn computed(mut self) -> Self {
        self.mode = AttributeMode::Computed;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.mode == AttributeMode::Required
    }

    /// The type of values this attribute holds
    pub fn value_type(&self) -> AttributeType {
        match &self.kind {
            AttributeKind::String => AttributeType::String,
            AttributeKind::Bool => AttributeType::Bool,
            AttributeKind::ListNested(object) => AttributeType::List(Box::new(object.value_type())),
            AttributeKind::SingleNested(object) => object.value_type(),
        }
    }
}

/// Top-level schema of a data source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: IndexMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Type of the whole state object
    pub fn value_type(&self) -> AttributeType {
        AttributeType::Object(
            self.attributes
                .iter()
                .map(|(name, attribute)| (name.clone(), attribute.value_type()))
                .collect(),
        )
    }

    /// Names of required attributes the configuration leaves unset
    ///
    /// Null and empty strings count as unset.
    pub fn missing_required(&self, config: &AttributeValue) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(_, attribute)| attribute.is_required())
            .filter(|(name, _)| match config.get(name) {
                Some(AttributeValue::String(s)) => s.is_empty(),
                Some(value) => value.is_null(),
                None => true,
            })
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_object() -> NestedObject {
        NestedObject::new()
            .with_attribute("version", Attribute::string().required())
            .with_attribute("exists", Attribute::bool().required())
    }

    #[test]
    fn list_nested_value_type_is_list_of_object() {
        let attribute = Attribute::list_nested(entry_object());

        assert_eq!(
            attribute.value_type(),
            AttributeType::List(Box::new(AttributeType::Object(IndexMap::from([
                ("version".to_string(), AttributeType::String),
                ("exists".to_string(), AttributeType::Bool),
            ]))))
        );
    }

    #[test]
    fn attribute_type_display_is_readable() {
        let ty = Attribute::list_nested(entry_object()).value_type();

        assert_eq!(ty.to_string(), "list(object({version: string, exists: bool}))");
    }

    #[test]
    fn attribute_builders_default_to_optional() {
        let attribute = Attribute::bool();

        assert_eq!(attribute.mode, AttributeMode::Optional);
        assert!(!attribute.is_required());
        assert_eq!(Attribute::bool().computed().mode, AttributeMode::Computed);
    }

    #[test]
    fn missing_required_reports_unset_null_and_empty() {
        let schema = Schema::new("test")
            .with_attribute("a", Attribute::string().required())
            .with_attribute("b", Attribute::string().required())
            .with_attribute("c", Attribute::string().required())
            .with_attribute("d", Attribute::string().required())
            .with_attribute("e", Attribute::string());

        let config = AttributeValue::object([
            ("a", AttributeValue::string("set")),
            ("b", AttributeValue::Null),
            ("c", AttributeValue::string("")),
        ]);

        assert_eq!(schema.missing_required(&config), vec!["b", "c", "d"]);
    }

    #[test]
    fn missing_required_treats_non_object_config_as_empty() {
        let schema = Schema::new("test").with_attribute("a", Attribute::string().required());

        assert_eq!(schema.missing_required(&AttributeValue::Null), vec!["a"]);
    }

    #[test]
    fn schema_serializes_kind_and_mode() {
        let schema = Schema::new("Lookup")
            .with_attribute("package", Attribute::string().required().with_description("Name"))
            .with_attribute("entries", Attribute::list_nested(entry_object()).computed());

        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "description": "Lookup",
                "attributes": {
                    "package": {"description": "Name", "mode": "required", "kind": "string"},
                    "entries": {
                        "mode": "computed",
                        "kind": "list_nested",
                        "attributes": {
                            "version": {"mode": "required", "kind": "string"},
                            "exists": {"mode": "required", "kind": "bool"}
                        }
                    }
                }
            })
        );
    }
}
