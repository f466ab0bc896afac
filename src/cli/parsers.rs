//! The place where the command line parser is defined.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::persistence::{ColumnKind, DEFAULT_DELIMITER};

#[derive(Parser)]
#[command(name = "tafla")]
#[command(about = "Inspect and edit typed flat file tables", long_about = None)]
pub struct CliParser {
    /// Directory relative table files are looked up in.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory the debug log is written to.
    #[arg(long, global = true)]
    pub logging_dir: Option<PathBuf>,

    /// Column delimiter used in the table files.
    #[arg(long, short, global = true, default_value = DEFAULT_DELIMITER, value_parser = parse_delimiter)]
    pub delimiter: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Print every row of a table.
    Show {
        file: PathBuf,

        /// Print the rows as a JSON array instead of a text table.
        #[arg(long)]
        json: bool,
    },

    /// Print the column names and types of a table.
    Schema {
        file: PathBuf,

        /// Print the columns as a JSON array instead.
        #[arg(long)]
        json: bool,
    },

    /// Create an empty table, e.g. `--column name:str --column age:int`.
    Create {
        file: PathBuf,

        #[arg(long = "column", short, required = true, value_parser = parse_column_definition)]
        columns: Vec<(String, ColumnKind)>,
    },

    /// Add a row, values are given in column order.
    Add {
        file: PathBuf,

        values: Vec<String>,

        /// Add a row of default values instead.
        #[arg(long, conflicts_with = "values")]
        defaults: bool,
    },

    /// Delete the row at a zero based index.
    Delete { file: PathBuf, index: usize },
}

pub fn parse_column_definition(definition: &str) -> Result<(String, ColumnKind), String> {
    //! Parse a `name:type` column definition.

    let (name, type_name) = definition
        .rsplit_once(':')
        .ok_or_else(|| format!("invalid column {}: expected name:type", definition))?;

    if name.is_empty() {
        return Err(format!("invalid column {}: name is empty", definition));
    }

    let kind = ColumnKind::from_type_name(type_name).map_err(|e| e.to_string())?;
    Ok((name.to_string(), kind))
}

pub fn parse_delimiter(delimiter: &str) -> Result<String, String> {
    if delimiter.is_empty() {
        return Err("invalid delimiter: cannot be empty".to_string());
    }
    Ok(delimiter.to_string())
}
