//! A single record
//!
//! A row is a detached snapshot: it keeps no reference to the schema it was
//! validated against. The owning table rewrites its rows whenever the
//! schema's column order changes.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use super::errors::{TableError, TableResult};
use crate::schema::Schema;
use crate::value::{self, Value};

/// Insertion-ordered mapping from field name to value
pub type RowData = IndexMap<String, Value>;

/// One record of a table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    data: RowData,
}

impl Row {
    pub fn new(data: RowData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &RowData {
        &self.data
    }

    pub fn into_data(self) -> RowData {
        self.data
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Field names in stored order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the portable form, keys in stored order
    pub fn to_dict(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .data
            .iter()
            .map(|(name, v)| (name.clone(), value::encode(v)))
            .collect();
        JsonValue::Object(map)
    }

    /// Parses the portable form without a schema, sniffing each value.
    ///
    /// Prefer `Row::decode` whenever the schema is known.
    pub fn from_dict(data: &JsonValue) -> TableResult<Self> {
        let obj = as_object(data)?;
        let data = obj
            .iter()
            .map(|(name, v)| {
                value::decode(v)
                    .map(|v| (name.clone(), v))
                    .map_err(|e| TableError::decode(name, e))
            })
            .collect::<TableResult<RowData>>()?;
        Ok(Self { data })
    }

    /// Parses the portable form using the declared type of each field.
    /// Keys the schema does not declare fall back to sniffing.
    pub fn decode(data: &JsonValue, schema: &Schema) -> TableResult<Self> {
        let obj = as_object(data)?;
        let data = obj
            .iter()
            .map(|(name, v)| {
                let decoded = match schema.field(name) {
                    Some(field) => value::decode_as(v, field.data_type()),
                    None => value::decode(v),
                };
                decoded
                    .map(|v| (name.clone(), v))
                    .map_err(|e| TableError::decode(name, e))
            })
            .collect::<TableResult<RowData>>()?;
        Ok(Self { data })
    }

    /// Rebuilds the mapping restricted to and ordered by `order`.
    pub(crate) fn reorder<S: AsRef<str>>(&mut self, order: &[S]) {
        let mut old = std::mem::take(&mut self.data);
        self.data = order
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                old.shift_remove(name).map(|v| (name.to_owned(), v))
            })
            .collect();
    }
}

fn as_object(data: &JsonValue) -> TableResult<&Map<String, JsonValue>> {
    data.as_object()
        .ok_or_else(|| TableError::malformed("row must be an object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use crate::value::{DataType, Picture, RealInterval};
    use serde_json::json;

    fn sample_row() -> Row {
        Row::new(RowData::from([
            ("id".to_string(), Value::Integer(1)),
            ("name".to_string(), Value::Text("Test".into())),
            (
                "interval".to_string(),
                Value::Interval(RealInterval::new(0.0, 10.0).unwrap()),
            ),
        ]))
    }

    #[test]
    fn test_to_dict() {
        let dict = sample_row().to_dict();
        assert_eq!(
            dict,
            json!({ "id": 1, "name": "Test", "interval": { "start": 0.0, "end": 10.0 } })
        );
        let keys: Vec<_> = dict.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "name", "interval"]);
    }

    #[test]
    fn test_sniffing_round_trip() {
        let row = sample_row();
        let restored = Row::from_dict(&row.to_dict()).unwrap();
        assert_eq!(restored, row);
    }

    #[test]
    fn test_data_access() {
        let row = Row::new(RowData::from([
            ("id".to_string(), Value::Integer(123)),
            ("value".to_string(), Value::Text("Example".into())),
        ]));
        assert_eq!(row.get("id"), Some(&Value::Integer(123)));
        assert_eq!(row.get("value"), Some(&Value::Text("Example".into())));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_typed_decode_resolves_ambiguity() {
        let schema = Schema::new(vec![
            Field::new("grade", DataType::Char),
            Field::new("photo", DataType::Picture),
        ])
        .unwrap();
        let gif = "R0lGODdhAQABAIABAAAAAP///ywAAAAAAQABAAACAUwAOw==";
        let data = json!({ "grade": "A", "photo": gif });

        let sniffed = Row::from_dict(&data).unwrap();
        assert_eq!(sniffed.get("grade"), Some(&Value::Text("A".into())));
        assert_eq!(sniffed.get("photo"), Some(&Value::Text(gif.into())));

        let typed = Row::decode(&data, &schema).unwrap();
        assert_eq!(typed.get("grade"), Some(&Value::Char('A')));
        assert_eq!(
            typed.get("photo"),
            Some(&Value::Picture(Picture::from_base64(gif).unwrap()))
        );
    }

    #[test]
    fn test_typed_decode_reports_field() {
        let schema = Schema::new(vec![Field::new("id", DataType::Int)]).unwrap();
        let err = Row::decode(&json!({ "id": "one" }), &schema).unwrap_err();
        assert!(matches!(err, TableError::Decode { ref field, .. } if field == "id"));
    }

    #[test]
    fn test_from_dict_rejects_non_object() {
        assert_eq!(Row::from_dict(&json!([1, 2])).unwrap_err().code(), "MALFORMED_TABLE");
    }

    #[test]
    fn test_reorder() {
        let mut row = sample_row();
        row.reorder(&["name", "interval", "id"]);
        assert_eq!(row.field_names().collect::<Vec<_>>(), vec!["name", "interval", "id"]);
        assert_eq!(row.get("id"), Some(&Value::Integer(1)));
    }
}
