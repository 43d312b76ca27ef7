//! Attribute values exchanged with the host

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::schema::types::AttributeType;

/// A value that does not match the type it was checked against
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value at {path} does not conform to declared type {expected}")]
pub struct TypeMismatch {
    pub path: String,
    pub expected: String,
}

/// A typed attribute value
///
/// Lists carry their element type so that an empty list is still typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Null,
    String(String),
    Bool(bool),
    List {
        element_type: AttributeType,
        elements: Vec<AttributeValue>,
    },
    Object(IndexMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn string(value: impl Into<String>) -> Self {
        AttributeValue::String(value.into())
    }

    pub fn list(element_type: AttributeType, elements: Vec<AttributeValue>) -> Self {
        AttributeValue::List {
            element_type,
            elements,
        }
    }

    pub fn object<'a>(attributes: impl IntoIterator<Item = (&'a str, AttributeValue)>) -> Self {
        AttributeValue::Object(
            attributes
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    /// Looks up an attribute of an object value
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        match self {
            AttributeValue::Object(attributes) => attributes.get(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List { elements, .. } => Some(elements),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Checks that this value has exactly the shape of `expected`
    ///
    /// Objects must carry every declared attribute and nothing else. Nulls
    /// never conform.
    pub fn conforms_to(&self, expected: &AttributeType) -> Result<(), TypeMismatch> {
        self.check(expected, "")
    }

    fn check(&self, expected: &AttributeType, path: &str) -> Result<(), TypeMismatch> {
        let mismatch = || TypeMismatch {
            path: display_path(path),
            expected: expected.to_string(),
        };

        match (self, expected) {
            (AttributeValue::String(_), AttributeType::String)
            | (AttributeValue::Bool(_), AttributeType::Bool) => Ok(()),
            (
                AttributeValue::List {
                    element_type,
                    elements,
                },
                AttributeType::List(expected_element),
            ) => {
                if element_type != expected_element.as_ref() {
                    return Err(mismatch());
                }
                elements.iter().enumerate().try_for_each(|(i, element)| {
                    element.check(expected_element, &format!("{}[{}]", path, i))
                })
            }
            (AttributeValue::Object(values), AttributeType::Object(types)) => {
                for (name, ty) in types {
                    let child = join_path(path, name);
                    match values.get(name) {
                        Some(value) => value.check(ty, &child)?,
                        None => {
                            return Err(TypeMismatch {
                                path: child,
                                expected: ty.to_string(),
                            });
                        }
                    }
                }
                match values.keys().find(|name| !types.contains_key(*name)) {
                    Some(extra) => Err(TypeMismatch {
                        path: join_path(path, extra),
                        expected: "no attribute".to_string(),
                    }),
                    None => Ok(()),
                }
            }
            _ => Err(mismatch()),
        }
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AttributeValue::Null => serializer.serialize_none(),
            AttributeValue::String(value) => serializer.serialize_str(value),
            AttributeValue::Bool(value) => serializer.serialize_bool(*value),
            AttributeValue::List { elements, .. } => elements.serialize(serializer),
            AttributeValue::Object(attributes) => attributes.serialize(serializer),
        }
    }
}
