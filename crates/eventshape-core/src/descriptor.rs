//! Field descriptors: metadata for one input slot of an event schema.
//!
//! A [`FieldDescriptor`] carries no data. It tells the host how to label,
//! type and pre-fill a slot, and whether the slot must be filled. Composite
//! slots (money, items, device) nest further descriptors in an ordered
//! [`FieldMap`].

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Result, SchemaError};

/// Scalar kind of a field, as understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Datetime,
    Object,
}

/// Rule the host uses to pre-fill a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    /// Derive the value from a path into the implicit source event,
    /// serialized as `{"@path": "$.context.ip"}`.
    Path {
        #[serde(rename = "@path")]
        path: String,
    },
    /// Fixed literal value.
    Literal(String),
}

/// One allowed value of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Describes one input slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub label: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    /// Repeated objects ("object, repeated") are `Object` with `multiple` set.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldDefault>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<FieldMap>,
}

impl FieldDescriptor {
    /// Builds a scalar descriptor without default or choices.
    pub fn scalar(
        label: impl Into<String>,
        description: impl Into<String>,
        kind: FieldType,
        required: bool,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            kind,
            multiple: false,
            required,
            default: None,
            choices: None,
            properties: None,
        }
    }

    /// Builds an object descriptor with nested properties.
    pub fn object(
        label: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        properties: FieldMap,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            kind: FieldType::Object,
            multiple: false,
            required,
            default: None,
            choices: None,
            properties: Some(properties),
        }
    }

    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.multiple = true;
        self
    }

    #[must_use]
    pub fn with_default_path(mut self, path: impl Into<String>) -> Self {
        self.default = Some(FieldDefault::Path { path: path.into() });
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(FieldDefault::Literal(value.into()));
        self
    }

    #[must_use]
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = Some(choices);
        self
    }

    pub fn is_composite(&self) -> bool {
        self.kind == FieldType::Object
    }

    /// Checks the shape invariants, recursing into nested properties.
    ///
    /// Object descriptors must carry at least one property, scalar
    /// descriptors none, and only objects may be repeated.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDescriptor`] naming the offending
    /// field path (e.g. `items.price`).
    pub fn validate(&self, name: &str) -> Result<()> {
        let invalid = |reason: &str| SchemaError::InvalidDescriptor {
            field: name.to_string(),
            reason: reason.to_string(),
        };

        match (&self.properties, self.is_composite()) {
            (None, true) => return Err(invalid("object field has no properties")),
            (Some(props), true) if props.is_empty() => {
                return Err(invalid("object field has no properties"))
            }
            (Some(_), false) => return Err(invalid("scalar field must not declare properties")),
            _ => {}
        }
        if self.multiple && !self.is_composite() {
            return Err(invalid("only object fields can be repeated"));
        }
        if self.choices.as_ref().is_some_and(Vec::is_empty) {
            return Err(invalid("choices must not be empty when present"));
        }

        if let Some(props) = &self.properties {
            for (key, child) in props.iter() {
                child.validate(&format!("{name}.{key}"))?;
            }
        }
        Ok(())
    }
}

/// Insertion-ordered map of field name to descriptor.
///
/// Keys are unique; inserting an existing key replaces the descriptor in
/// place. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldDescriptor)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, descriptor: FieldDescriptor) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = descriptor,
            None => self.entries.push((key, descriptor)),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, descriptor)| descriptor)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, descriptor) in &self.entries {
            map.serialize_entry(key, descriptor)?;
        }
        map.end()
    }
}
