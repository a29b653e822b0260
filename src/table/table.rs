//! Schema-enforcing row collection
//!
//! Persisted form:
//!
//! ```text
//! {
//!   "name": "people",
//!   "schema": { "fields": [ ... ] },
//!   "rows": [ { "<field>": <encoded value>, ... }, ... ]
//! }
//! ```

use serde_json::{json, Value as JsonValue};

use super::errors::{TableError, TableResult};
use super::row::{Row, RowData};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{ExtraFields, Schema};

/// A named table bound to one schema
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    schema: Schema,
    rows: Vec<Row>,
    extra_fields: ExtraFields,
}

impl Table {
    /// Creates an empty table
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            rows: Vec::new(),
            extra_fields: ExtraFields::default(),
        }
    }

    /// Sets the policy for undeclared keys in written data
    pub fn with_extra_fields(mut self, policy: ExtraFields) -> Self {
        self.extra_fields = policy;
        self
    }

    pub fn set_extra_fields(&mut self, policy: ExtraFields) {
        self.extra_fields = policy;
    }

    pub fn extra_fields(&self) -> ExtraFields {
        self.extra_fields
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Validates `data` and appends it as a new row.
    ///
    /// # Errors
    ///
    /// `MissingField` or `TypeMismatch` from schema validation, or
    /// `UnexpectedField` when the table rejects undeclared keys.
    pub fn add_row(&mut self, data: RowData) -> TableResult<()> {
        let row = self.admit(data)?;
        self.rows.push(row);

        let index = (self.rows.len() - 1).to_string();
        log_event_with_fields(
            Event::RowInserted,
            &[("table", self.name.as_str()), ("index", index.as_str())],
        );
        Ok(())
    }

    /// Validates `data` and replaces the row at `index` with it.
    pub fn edit_row(&mut self, index: usize, data: RowData) -> TableResult<()> {
        self.check_index(index)?;
        let row = self.admit(data)?;
        self.rows[index] = row;

        log_event_with_fields(
            Event::RowUpdated,
            &[("table", self.name.as_str()), ("index", index.to_string().as_str())],
        );
        Ok(())
    }

    /// Removes the row at `index`; later rows shift down by one.
    pub fn delete_row(&mut self, index: usize) -> TableResult<Row> {
        self.check_index(index)?;
        let row = self.rows.remove(index);

        log_event_with_fields(
            Event::RowDeleted,
            &[("table", self.name.as_str()), ("index", index.to_string().as_str())],
        );
        Ok(row)
    }

    /// Puts the columns into `new_order`, which must be a permutation of the
    /// current column names. Every row is rewritten to the same order.
    ///
    /// Nothing is modified when the order is rejected.
    ///
    /// # Errors
    ///
    /// - `ColumnCountMismatch` if the lengths differ
    /// - `ColumnSetMismatch` if the names are not the current names
    pub fn rename_or_reorder_columns<S: AsRef<str>>(&mut self, new_order: &[S]) -> TableResult<()> {
        if new_order.len() != self.schema.len() {
            return Err(TableError::ColumnCountMismatch {
                expected: self.schema.len(),
                found: new_order.len(),
            });
        }

        let mut current: Vec<&str> = self.schema.field_names().collect();
        let mut requested: Vec<&str> = new_order.iter().map(|s| s.as_ref()).collect();
        current.sort_unstable();
        requested.sort_unstable();
        if current != requested {
            return Err(TableError::ColumnSetMismatch(format!(
                "expected {:?}, got {:?}",
                current, requested
            )));
        }

        self.schema.reorder(new_order);
        for row in &mut self.rows {
            row.reorder(new_order);
        }

        let columns = new_order
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        log_event_with_fields(
            Event::ColumnsReordered,
            &[("table", self.name.as_str()), ("columns", columns.as_str())],
        );
        Ok(())
    }

    /// Decodes portable row data using the schema's declared types. The
    /// result still has to go through `add_row` or `edit_row`.
    pub fn decode_row(&self, data: &JsonValue) -> TableResult<RowData> {
        Row::decode(data, &self.schema).map(Row::into_data)
    }

    /// Returns the persisted form of the table
    pub fn to_dict(&self) -> JsonValue {
        json!({
            "name": self.name,
            "schema": self.schema.to_dict(),
            "rows": self.rows.iter().map(Row::to_dict).collect::<Vec<_>>(),
        })
    }

    /// Rebuilds a table from its persisted form. The schema is restored
    /// first and every row is decoded through it and revalidated, keeping
    /// row order.
    pub fn from_dict(data: &JsonValue) -> TableResult<Self> {
        let name = data
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| TableError::malformed("'name' must be a string"))?;
        let schema = data
            .get("schema")
            .ok_or_else(|| TableError::malformed("'schema' is missing"))?;
        let rows = data
            .get("rows")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| TableError::malformed("'rows' must be an array"))?;

        let mut table = Table::new(name, Schema::from_dict(schema)?);
        for row in rows {
            let row = Row::decode(row, &table.schema)?;
            let row = table.admit(row.into_data())?;
            table.rows.push(row);
        }
        Ok(table)
    }

    fn check_index(&self, index: usize) -> TableResult<()> {
        if index >= self.rows.len() {
            return Err(TableError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    /// Validates `data` and lays it out in schema order. Undeclared keys
    /// are rejected or dropped depending on the table's policy.
    fn admit(&self, mut data: RowData) -> TableResult<Row> {
        match self.extra_fields {
            ExtraFields::Reject => self.schema.validate_strict(&data)?,
            ExtraFields::Drop => self.schema.validate(&data)?,
        }

        let dropped = self.schema.undeclared_keys(&data).collect::<Vec<_>>().join(",");
        if !dropped.is_empty() {
            log_event_with_fields(
                Event::ExtraFieldsDropped,
                &[("table", self.name.as_str()), ("fields", dropped.as_str())],
            );
        }

        let ordered: RowData = self
            .schema
            .field_names()
            .filter_map(|name| data.swap_remove(name).map(|v| (name.to_owned(), v)))
            .collect();
        Ok(Row::new(ordered))
    }
}
