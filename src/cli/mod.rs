//! CLI module for tablestore
//!
//! Provides command-line interface for:
//! - init: Write the configuration and an empty database
//! - create-table / drop-table / tables: Manage the table directory
//! - show: Print a table in its persisted form
//! - insert / update / delete: Row edits, rows read from stdin as JSON,
//!   picture cells optionally read from files
//! - reorder: Rename or reorder a table's columns
//! - export-picture: Write a stored picture back to a file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{execute, init, open_database, parse_schema, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
