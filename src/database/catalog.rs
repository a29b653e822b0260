//! Name→table registry with file persistence

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use super::errors::{DatabaseError, DatabaseResult};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{ExtraFields, Schema};
use crate::table::Table;

/// A set of uniquely named tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    tables: IndexMap<String, Table>,
    extra_fields: ExtraFields,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the undeclared-key policy applied to every table this
    /// directory creates or loads
    pub fn with_extra_fields(mut self, policy: ExtraFields) -> Self {
        self.extra_fields = policy;
        for table in self.tables.values_mut() {
            table.set_extra_fields(policy);
        }
        self
    }

    /// Opens the database stored at `path`
    pub fn open(path: &Path) -> DatabaseResult<Self> {
        let mut db = Self::new();
        db.load_from_disk(path)?;
        Ok(db)
    }

    /// Registers a new empty table
    pub fn create_table(&mut self, name: &str, schema: Schema) -> DatabaseResult<&mut Table> {
        if self.tables.contains_key(name) {
            return Err(DatabaseError::TableExists(name.to_owned()));
        }

        let table = Table::new(name, schema).with_extra_fields(self.extra_fields);
        log_event_with_fields(Event::TableCreated, &[("table", name)]);
        Ok(self.tables.entry(name.to_owned()).or_insert(table))
    }

    /// Removes a table and all its rows
    pub fn delete_table(&mut self, name: &str) -> DatabaseResult<Table> {
        let table = self
            .tables
            .shift_remove(name)
            .ok_or_else(|| DatabaseError::TableNotFound(name.to_owned()))?;

        log_event_with_fields(Event::TableDeleted, &[("table", name)]);
        Ok(table)
    }

    pub fn table(&self, name: &str) -> DatabaseResult<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| DatabaseError::TableNotFound(name.to_owned()))
    }

    pub fn table_mut(&mut self, name: &str) -> DatabaseResult<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| DatabaseError::TableNotFound(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in creation order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the persisted form: one table tree per table name
    pub fn to_dict(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .tables
            .iter()
            .map(|(name, table)| (name.clone(), table.to_dict()))
            .collect();
        JsonValue::Object(map)
    }

    /// Adds every table in `data` to the directory, replacing tables of the
    /// same name. Each table must be stored under its own name. Nothing is
    /// added if any table fails.
    pub fn merge_dict(&mut self, data: &JsonValue) -> DatabaseResult<()> {
        let obj = data
            .as_object()
            .ok_or_else(|| DatabaseError::Malformed("top level must be an object".into()))?;

        let mut loaded = Vec::with_capacity(obj.len());
        for (name, table_data) in obj {
            let table = Table::from_dict(table_data)
                .map_err(|e| DatabaseError::in_table(name, e))?
                .with_extra_fields(self.extra_fields);
            if table.name() != name {
                return Err(DatabaseError::Malformed(format!(
                    "table stored under '{}' is named '{}'",
                    name,
                    table.name()
                )));
            }
            loaded.push((name.clone(), table));
        }

        self.tables.extend(loaded);
        Ok(())
    }

    /// Builds a directory from its persisted form
    pub fn from_dict(data: &JsonValue) -> DatabaseResult<Self> {
        let mut db = Self::new();
        db.merge_dict(data)?;
        Ok(db)
    }

    /// Writes the whole database to `path` as one JSON document.
    ///
    /// The document is written to a sibling temporary file first and then
    /// renamed over `path`, so a failed save leaves the old file intact.
    pub fn save_to_disk(&self, path: &Path) -> DatabaseResult<()> {
        let content = serde_json::to_string_pretty(&self.to_dict())?;

        let tmp = temp_path(path);
        fs::write(&tmp, content).map_err(|e| {
            DatabaseError::Io(format!("failed to write '{}': {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, path).map_err(|e| {
            DatabaseError::Io(format!("failed to replace '{}': {}", path.display(), e))
        })?;

        let path_str = path.display().to_string();
        let tables = self.tables.len().to_string();
        log_event_with_fields(
            Event::DatabaseSaved,
            &[("path", path_str.as_str()), ("tables", tables.as_str())],
        );
        Ok(())
    }

    /// Reads the JSON document at `path` and merges its tables into the
    /// directory.
    pub fn load_from_disk(&mut self, path: &Path) -> DatabaseResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            DatabaseError::Io(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let data: JsonValue = serde_json::from_str(&content)?;
        self.merge_dict(&data)?;

        let path_str = path.display().to_string();
        let tables = self.tables.len().to_string();
        log_event_with_fields(
            Event::DatabaseLoaded,
            &[("path", path_str.as_str()), ("tables", tables.as_str())],
        );
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use crate::table::RowData;
    use crate::value::{DataType, RealInterval, Value};
    use tempfile::TempDir;

    fn test_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Int),
            Field::new("name", DataType::Str),
            Field::new("interval", DataType::RealInterval),
        ])
        .unwrap()
    }

    fn test_db() -> Database {
        let mut db = Database::new();
        db.create_table("TestTable", test_schema()).unwrap();
        db
    }

    fn row_data() -> RowData {
        RowData::from([
            ("id".to_string(), Value::Integer(1)),
            ("name".to_string(), Value::Text("Test".into())),
            (
                "interval".to_string(),
                Value::Interval(RealInterval::new(1.0, 5.0).unwrap()),
            ),
        ])
    }

    #[test]
    fn test_create_and_delete_table() {
        let mut db = test_db();
        db.create_table("NewTable", test_schema()).unwrap();
        assert!(db.contains("NewTable"));

        db.delete_table("NewTable").unwrap();
        assert!(!db.contains("NewTable"));
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_create_duplicate_table() {
        let mut db = test_db();
        let err = db.create_table("TestTable", test_schema()).unwrap_err();
        assert_eq!(err, DatabaseError::TableExists("TestTable".into()));
    }

    #[test]
    fn test_delete_missing_table() {
        let mut db = test_db();
        let err = db.delete_table("Nope").unwrap_err();
        assert_eq!(err.code(), "TABLE_NOT_FOUND");
        assert!(db.table("Nope").is_err());
    }

    #[test]
    fn test_table_names_keep_creation_order() {
        let mut db = Database::new();
        for name in ["b", "a", "c"] {
            db.create_table(name, test_schema()).unwrap();
        }
        assert_eq!(db.table_names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test_db.json");

        let mut db = test_db();
        db.table_mut("TestTable").unwrap().add_row(row_data()).unwrap();
        db.save_to_disk(&path).unwrap();
        assert!(!temp_path(&path).exists());

        let loaded = Database::open(&path).unwrap();
        assert_eq!(loaded.table("TestTable").unwrap().len(), 1);
        assert_eq!(loaded, db);
    }

    #[test]
    fn test_load_merges_into_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        test_db().save_to_disk(&path).unwrap();

        let mut db = Database::new();
        db.create_table("Other", test_schema()).unwrap();
        db.load_from_disk(&path).unwrap();
        assert_eq!(db.table_names().collect::<Vec<_>>(), vec!["Other", "TestTable"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Database::open(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), "DATABASE_IO_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Database::open(&path).unwrap_err().code(), "DATABASE_JSON_ERROR");
    }

    #[test]
    fn test_merge_is_all_or_nothing() {
        let mut db = Database::new();
        let data = serde_json::json!({
            "good": test_db().table("TestTable").unwrap().to_dict(),
            "bad": { "name": "bad", "schema": { "fields": [] } }
        });

        let err = db.merge_dict(&data).unwrap_err();
        assert!(matches!(err, DatabaseError::Table { ref table, .. } if table == "bad"));
        assert!(db.is_empty());
    }

    #[test]
    fn test_merge_rejects_key_name_mismatch() {
        let mut table = test_db().table("TestTable").unwrap().to_dict();
        table["name"] = serde_json::json!("b");
        let data = serde_json::json!({ "a": table });

        let mut db = Database::new();
        let err = db.merge_dict(&data).unwrap_err();
        assert_eq!(err.code(), "MALFORMED_DATABASE");
        assert!(db.is_empty());
    }

    #[test]
    fn test_policy_applies_to_created_and_loaded_tables() {
        let mut db = Database::new().with_extra_fields(ExtraFields::Reject);
        db.create_table("t", test_schema()).unwrap();
        assert_eq!(db.table("t").unwrap().extra_fields(), ExtraFields::Reject);

        let db = Database::from_dict(&test_db().to_dict())
            .unwrap()
            .with_extra_fields(ExtraFields::Reject);
        assert_eq!(db.table("TestTable").unwrap().extra_fields(), ExtraFields::Reject);
    }
}
