//! CLI argument definitions using clap
//!
//! Commands:
//! - tablestore init [--database <path>]
//! - tablestore create-table --name <table> --field <name:type>...
//! - tablestore drop-table --name <table>
//! - tablestore tables
//! - tablestore show --table <table>
//! - tablestore insert --table <table> [--picture <field=path>...]
//! - tablestore update --table <table> --index <i> [--picture <field=path>...]
//! - tablestore delete --table <table> --index <i>
//! - tablestore reorder --table <table> --columns <a,b,c>
//! - tablestore export-picture --table <table> --index <i> --field <f> --out <path>
//!
//! insert and update read the row as JSON on stdin.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tablestore - schema-enforced tables in a single JSON document
#[derive(Parser, Debug)]
#[command(name = "tablestore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./tablestore.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write a configuration file and an empty database
    Init {
        /// Where the database document lives
        #[arg(long, default_value = "./tablestore.db.json")]
        database: PathBuf,
    },

    /// Create a table
    CreateTable {
        /// Table name
        #[arg(long)]
        name: String,

        /// Column as NAME:TYPE, with TYPE one of int, float, str, char, picture, realInvl
        #[arg(long = "field", value_name = "NAME:TYPE", required = true)]
        fields: Vec<String>,
    },

    /// Delete a table and its rows
    DropTable {
        /// Table name
        #[arg(long)]
        name: String,
    },

    /// List tables
    Tables,

    /// Print a table in its persisted form
    Show {
        /// Table name
        #[arg(long)]
        table: String,
    },

    /// Append the row read from stdin
    Insert {
        /// Table name
        #[arg(long)]
        table: String,

        /// Picture cell read from a file, replacing the field in the row
        #[arg(long = "picture", value_name = "FIELD=PATH")]
        pictures: Vec<String>,
    },

    /// Replace a row with the row read from stdin
    Update {
        /// Table name
        #[arg(long)]
        table: String,

        /// Row position
        #[arg(long)]
        index: usize,

        /// Picture cell read from a file, replacing the field in the row
        #[arg(long = "picture", value_name = "FIELD=PATH")]
        pictures: Vec<String>,
    },

    /// Delete a row
    Delete {
        /// Table name
        #[arg(long)]
        table: String,

        /// Row position
        #[arg(long)]
        index: usize,
    },

    /// Reorder the columns of a table
    Reorder {
        /// Table name
        #[arg(long)]
        table: String,

        /// Every current column name, in the new order
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,
    },

    /// Write a stored picture to a file
    ExportPicture {
        /// Table name
        #[arg(long)]
        table: String,

        /// Row position
        #[arg(long)]
        index: usize,

        /// Picture column
        #[arg(long)]
        field: String,

        /// Destination file
        #[arg(long)]
        out: PathBuf,
    },
}

impl Command {
    /// Whether the command reads a row from stdin
    pub fn reads_input(&self) -> bool {
        matches!(self, Command::Insert { .. } | Command::Update { .. })
    }

    /// Whether the command changes the database
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Init { .. }
                | Command::Tables
                | Command::Show { .. }
                | Command::ExportPicture { .. }
        )
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
