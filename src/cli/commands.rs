//! CLI command implementations
//!
//! Every command except `init` follows the same sequence:
//! 1. Load and validate the configuration
//! 2. Open the database document (a missing document is an empty database)
//! 3. Execute the command against the in-memory database
//! 4. Save the database if the command changed it
//! 5. Write the JSON response

use std::path::Path;

use serde_json::{json, Value};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};
use crate::database::{Database, DatabaseError};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::{Field, Schema};
use crate::table::{RowData, TableError};
use crate::value::{Picture, Value as CellValue};

/// Parse arguments, run the command and report errors on stdout
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(&cli.config, cli.command).inspect_err(|e| {
        log_event_with_fields(
            Event::CommandFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
        let _ = write_error(e.code_str(), e.message());
    })
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: &Path, cmd: Command) -> CliResult<()> {
    if let Command::Init { database } = &cmd {
        return init(config_path, database);
    }

    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.min_severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("config", config_path.display().to_string().as_str())],
    );

    let mut db = open_database(&config)?;
    let input = if cmd.reads_input() {
        Some(read_request()?)
    } else {
        None
    };

    let mutating = cmd.is_mutating();
    let data = execute(&mut db, cmd, input)?;
    if mutating {
        db.save_to_disk(config.database_path())?;
    }

    write_response(data)
}

/// Write a configuration file and an empty database
///
/// An existing database document is kept as it is.
pub fn init(config_path: &Path, database: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized());
    }

    let config = Config::new(database.display().to_string());
    if !database.exists() {
        Database::new().save_to_disk(database)?;
    }
    config.save(config_path)?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "database": config.database_path,
    }))
}

/// Opens the configured database, treating a missing document as empty
pub fn open_database(config: &Config) -> CliResult<Database> {
    let path = config.database_path();
    let db = if path.exists() {
        Database::open(path)?
    } else {
        Database::new()
    };
    Ok(db.with_extra_fields(config.extra_fields))
}

/// Executes a command against an open database and returns the response data.
///
/// `input` carries the row for `insert` and `update`. Picture files named by
/// `--picture` are read here.
pub fn execute(db: &mut Database, cmd: Command, input: Option<Value>) -> CliResult<Value> {
    match cmd {
        Command::Init { .. } => Err(CliError::invalid_input(
            "init does not operate on an open database",
        )),

        Command::CreateTable { name, fields } => {
            let schema = parse_schema(&fields)?;
            let table = db.create_table(&name, schema)?;
            Ok(json!({ "created": name, "schema": table.schema().to_dict() }))
        }

        Command::DropTable { name } => {
            let table = db.delete_table(&name)?;
            Ok(json!({ "dropped": name, "rows": table.len() }))
        }

        Command::Tables => Ok(Value::Array(
            db.tables()
                .map(|t| json!({ "name": t.name(), "rows": t.len() }))
                .collect(),
        )),

        Command::Show { table } => Ok(db.table(&table)?.to_dict()),

        Command::Insert {
            table: name,
            pictures,
        } => {
            let input = require_input(input)?;
            let table = db.table_mut(&name)?;
            let mut data = table.decode_row(&input).map_err(in_table(&name))?;
            attach_pictures(&mut data, &pictures)?;
            table.add_row(data).map_err(in_table(&name))?;
            Ok(json!({ "table": name, "index": table.len() - 1 }))
        }

        Command::Update {
            table: name,
            index,
            pictures,
        } => {
            let input = require_input(input)?;
            let table = db.table_mut(&name)?;
            let mut data = table.decode_row(&input).map_err(in_table(&name))?;
            attach_pictures(&mut data, &pictures)?;
            table.edit_row(index, data).map_err(in_table(&name))?;
            Ok(json!({ "table": name, "index": index }))
        }

        Command::Delete { table: name, index } => {
            let table = db.table_mut(&name)?;
            let row = table.delete_row(index).map_err(in_table(&name))?;
            Ok(json!({ "table": name, "deleted": row.to_dict() }))
        }

        Command::Reorder {
            table: name,
            columns,
        } => {
            let table = db.table_mut(&name)?;
            table
                .rename_or_reorder_columns(columns.as_slice())
                .map_err(in_table(&name))?;
            Ok(json!({ "table": name, "columns": columns }))
        }

        Command::ExportPicture {
            table: name,
            index,
            field,
            out,
        } => {
            let table = db.table(&name)?;
            let row = table.row(index).ok_or_else(|| {
                DatabaseError::in_table(
                    &name,
                    TableError::IndexOutOfRange {
                        index,
                        len: table.len(),
                    },
                )
            })?;
            let picture = match row.get(&field) {
                Some(CellValue::Picture(picture)) => picture,
                Some(other) => {
                    return Err(CliError::invalid_input(format!(
                        "field '{}' holds a {} value, not a picture",
                        field,
                        other.data_type()
                    )))
                }
                None => {
                    return Err(CliError::invalid_input(format!(
                        "table '{}' has no field '{}'",
                        name, field
                    )))
                }
            };
            picture.save_to_file(&out)?;

            Ok(json!({
                "table": name,
                "index": index,
                "field": field,
                "path": out.display().to_string(),
                "bytes": picture.len(),
            }))
        }
    }
}

/// Parses `NAME:TYPE` column definitions into a schema
pub fn parse_schema(columns: &[String]) -> CliResult<Schema> {
    let fields = columns
        .iter()
        .map(|column| {
            let (name, tag) = column.rsplit_once(':').ok_or_else(|| {
                CliError::invalid_input(format!("expected NAME:TYPE, got '{}'", column))
            })?;
            if name.is_empty() {
                return Err(CliError::invalid_input(format!(
                    "column name missing in '{}'",
                    column
                )));
            }
            Ok(Field::with_tag(name, tag)?)
        })
        .collect::<CliResult<Vec<_>>>()?;

    Ok(Schema::new(fields)?)
}

/// Sets each `FIELD=PATH` picture cell from its file. A file replaces any
/// base64 text the row carried for the same field.
fn attach_pictures(data: &mut RowData, pictures: &[String]) -> CliResult<()> {
    for arg in pictures {
        let (field, path) = arg.split_once('=').ok_or_else(|| {
            CliError::invalid_input(format!("expected FIELD=PATH, got '{}'", arg))
        })?;
        if field.is_empty() || path.is_empty() {
            return Err(CliError::invalid_input(format!(
                "expected FIELD=PATH, got '{}'",
                arg
            )));
        }
        let picture = Picture::load(Some(Path::new(path)), None)?;
        data.insert(field.to_owned(), CellValue::Picture(picture));
    }
    Ok(())
}

fn require_input(input: Option<Value>) -> CliResult<Value> {
    input.ok_or_else(|| CliError::invalid_input("this command reads a row from stdin"))
}

fn in_table(name: &str) -> impl Fn(TableError) -> DatabaseError + '_ {
    move |e| DatabaseError::in_table(name, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DataType;
    use std::fs;
    use tempfile::TempDir;

    fn db_with_people() -> Database {
        let mut db = Database::new();
        execute(
            &mut db,
            Command::CreateTable {
                name: "people".into(),
                fields: vec!["id:int".into(), "name:str".into(), "grade:char".into()],
            },
            None,
        )
        .unwrap();
        db
    }

    fn insert(db: &mut Database, row: Value) -> CliResult<Value> {
        execute(
            db,
            Command::Insert {
                table: "people".into(),
                pictures: vec![],
            },
            Some(row),
        )
    }

    #[test]
    fn test_parse_schema() {
        let schema = parse_schema(&["id:int".into(), "a:b:realInvl".into()]).unwrap();
        assert_eq!(schema.fields()[0].data_type(), DataType::Int);
        assert_eq!(schema.fields()[1].name(), "a:b");
        assert_eq!(schema.fields()[1].data_type(), DataType::RealInterval);
    }

    #[test]
    fn test_parse_schema_errors() {
        let cases = [
            (vec!["id".to_string()], "INVALID_INPUT"),
            (vec![":int".to_string()], "INVALID_INPUT"),
            (vec!["id:bool".to_string()], "UNKNOWN_FIELD_TYPE"),
            (vec!["id:int".to_string(), "id:str".to_string()], "DUPLICATE_FIELD_NAME"),
        ];
        for (columns, code) in cases {
            assert_eq!(parse_schema(&columns).unwrap_err().code_str(), code);
        }
    }

    #[test]
    fn test_insert_decodes_through_schema() {
        let mut db = db_with_people();
        let response = insert(&mut db, json!({ "id": 1, "name": "Ann", "grade": "A" })).unwrap();
        assert_eq!(response, json!({ "table": "people", "index": 0 }));

        let row = &db.table("people").unwrap().rows()[0];
        assert_eq!(row.get("grade"), Some(&CellValue::Char('A')));
    }

    #[test]
    fn test_insert_errors_carry_store_codes() {
        let mut db = db_with_people();
        let err = insert(&mut db, json!({ "id": 1, "name": "Ann" })).unwrap_err();
        assert_eq!(err.code_str(), "MISSING_FIELD");

        let err = insert(&mut db, json!({ "id": "1", "name": "Ann", "grade": "A" })).unwrap_err();
        assert_eq!(err.code_str(), "DECODE_FAILED");
        assert!(err.message().contains("people"));

        let cmd = Command::Insert {
            table: "people".into(),
            pictures: vec![],
        };
        let err = execute(&mut db, cmd, None).unwrap_err();
        assert_eq!(err.code_str(), "INVALID_INPUT");
    }

    #[test]
    fn test_update_delete_reorder() {
        let mut db = db_with_people();
        insert(&mut db, json!({ "id": 1, "name": "Ann", "grade": "A" })).unwrap();

        execute(
            &mut db,
            Command::Update {
                table: "people".into(),
                index: 0,
                pictures: vec![],
            },
            Some(json!({ "id": 2, "name": "Bob", "grade": "B" })),
        )
        .unwrap();

        execute(
            &mut db,
            Command::Reorder {
                table: "people".into(),
                columns: vec!["grade".into(), "name".into(), "id".into()],
            },
            None,
        )
        .unwrap();

        let response = execute(
            &mut db,
            Command::Delete {
                table: "people".into(),
                index: 0,
            },
            None,
        )
        .unwrap();
        let deleted = response["deleted"].as_object().unwrap();
        assert_eq!(deleted.keys().collect::<Vec<_>>(), vec!["grade", "name", "id"]);
        assert_eq!(deleted["id"], json!(2));

        let err = execute(
            &mut db,
            Command::Delete {
                table: "people".into(),
                index: 0,
            },
            None,
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "INDEX_OUT_OF_RANGE");
    }

    #[test]
    fn test_tables_and_drop() {
        let mut db = db_with_people();
        let tables = execute(&mut db, Command::Tables, None).unwrap();
        assert_eq!(tables, json!([{ "name": "people", "rows": 0 }]));

        execute(&mut db, Command::DropTable { name: "people".into() }, None).unwrap();
        let err = execute(&mut db, Command::Show { table: "people".into() }, None).unwrap_err();
        assert_eq!(err.code_str(), "TABLE_NOT_FOUND");
    }

    #[test]
    fn test_open_database_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("db.json").display().to_string());
        let db = open_database(&config).unwrap();
        assert!(db.is_empty());
    }

    #[test]
    fn test_attach_pictures_reads_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("face.bin");
        fs::write(&path, [7u8, 8, 9]).unwrap();

        let mut data = RowData::new();
        attach_pictures(&mut data, &[format!("photo={}", path.display())]).unwrap();
        assert_eq!(
            data.get("photo"),
            Some(&CellValue::Picture(Picture::from_bytes(vec![7, 8, 9])))
        );
    }

    #[test]
    fn test_attach_pictures_errors() {
        let dir = TempDir::new().unwrap();
        let missing = format!("photo={}", dir.path().join("absent.jpg").display());

        let mut data = RowData::new();
        for (arg, code) in [
            ("photo".to_string(), "INVALID_INPUT"),
            ("=face.jpg".to_string(), "INVALID_INPUT"),
            (missing, "VALUE_IO_ERROR"),
        ] {
            let err = attach_pictures(&mut data, &[arg]).unwrap_err();
            assert_eq!(err.code_str(), code);
        }
        assert!(data.is_empty());
    }

    #[test]
    fn test_export_picture_requires_picture_field() {
        let mut db = db_with_people();
        insert(&mut db, json!({ "id": 1, "name": "Ann", "grade": "A" })).unwrap();
        let dir = TempDir::new().unwrap();

        let export = |field: &str, index: usize| Command::ExportPicture {
            table: "people".into(),
            index,
            field: field.into(),
            out: dir.path().join("out.bin"),
        };

        let err = execute(&mut db, export("name", 0), None).unwrap_err();
        assert_eq!(err.code_str(), "INVALID_INPUT");
        let err = execute(&mut db, export("photo", 0), None).unwrap_err();
        assert_eq!(err.code_str(), "INVALID_INPUT");
        let err = execute(&mut db, export("name", 3), None).unwrap_err();
        assert_eq!(err.code_str(), "INDEX_OUT_OF_RANGE");
        assert!(!dir.path().join("out.bin").exists());
    }
}
