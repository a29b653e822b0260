//! Schema type definitions
//!
//! Persisted form:
//!
//! ```text
//! { "fields": [ { "name": "id", "data_type": "int" }, ... ] }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use super::errors::{SchemaError, SchemaResult};
use crate::value::DataType;

/// A named, typed column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    data_type: DataType,
}

impl Field {
    /// Create a field of the given type
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Create a field from a persisted type tag
    pub fn with_tag(name: impl Into<String>, tag: &str) -> SchemaResult<Self> {
        let data_type =
            DataType::from_tag(tag).ok_or_else(|| SchemaError::UnknownFieldType(tag.to_owned()))?;
        Ok(Self::new(name, data_type))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the persisted form of this field
    pub fn to_dict(&self) -> JsonValue {
        json!({ "name": self.name, "data_type": self.data_type.tag() })
    }

    /// Parses the persisted form of a field
    pub fn from_dict(data: &JsonValue) -> SchemaResult<Self> {
        let name = data
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| SchemaError::malformed("field 'name' must be a string"))?;
        let tag = data
            .get("data_type")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                SchemaError::malformed(format!("field '{}': 'data_type' must be a string", name))
            })?;
        Self::with_tag(name, tag)
    }
}

/// Ordered field list with pairwise distinct names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create a schema. Fails if two fields share a name.
    pub fn new(fields: Vec<Field>) -> SchemaResult<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(SchemaError::DuplicateFieldName(field.name().to_owned()));
            }
        }
        Ok(Self { fields })
    }

    /// Fields in column order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field names in column order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rearranges the fields to follow `order`.
    ///
    /// The caller must have checked that `order` is a permutation of the
    /// current names; names that are not found are skipped.
    pub(crate) fn reorder<S: AsRef<str>>(&mut self, order: &[S]) {
        let mut remaining = std::mem::take(&mut self.fields);
        let mut fields = Vec::with_capacity(remaining.len());
        for name in order {
            if let Some(pos) = remaining.iter().position(|f| f.name() == name.as_ref()) {
                fields.push(remaining.swap_remove(pos));
            }
        }
        self.fields = fields;
    }

    /// Returns the persisted form of this schema
    pub fn to_dict(&self) -> JsonValue {
        json!({ "fields": self.fields.iter().map(Field::to_dict).collect::<Vec<_>>() })
    }

    /// Parses the persisted form of a schema, keeping field order
    pub fn from_dict(data: &JsonValue) -> SchemaResult<Self> {
        let fields = data
            .get("fields")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| SchemaError::malformed("'fields' must be an array"))?;

        let fields = fields
            .iter()
            .map(Field::from_dict)
            .collect::<SchemaResult<Vec<_>>>()?;

        Self::new(fields)
    }
}

/// What a table does with keys that the schema does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFields {
    /// Accept the data and store only the declared fields
    #[default]
    Drop,
    /// Fail the write with `UnexpectedField`
    Reject,
}
