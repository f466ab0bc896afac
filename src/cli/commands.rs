//! This module where all the commands are executed.
//!
//! Tafla command line syntax:
//!
//! - tafla show <file> [--json]
//! - tafla schema <file> [--json]
//! - tafla create <file> --column name:type...
//! - tafla add <file> [values...] [--defaults]
//! - tafla delete <file> <index>
//!
//! Relative file names are resolved against the configured data
//! directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use log::info;
use serde::Serialize;

use crate::cli::messages::{highlight_argument, system_message};
use crate::cli::parsers::CliCommand;
use crate::config::Config;
use crate::persistence::{ColumnKind, Data, Row, StoreError, Value};

pub(crate) fn execute(command: CliCommand, config: &Config, delimiter: &str) -> Result<String, String> {
    //! Run a single command against its table file.
    //!
    //! Returns the text to print on success, or a formatted error
    //! message.

    match command {
        CliCommand::Show { file, json } => {
            let data = open(config, &file, delimiter)?;
            if json {
                rows_to_json(&data)
            } else {
                Ok(format!("{}", data).trim_end().to_string())
            }
        }
        CliCommand::Schema { file, json } => {
            let data = open(config, &file, delimiter)?;
            if json {
                return schema_to_json(&data);
            }

            let width = data
                .column_names()
                .iter()
                .map(|name| name.chars().count())
                .max()
                .unwrap_or(0);
            let lines: Vec<String> = data
                .column_names()
                .iter()
                .zip(data.column_kinds())
                .map(|(name, kind)| format!("{:<width$} {}", name, kind, width = width))
                .collect();
            Ok(lines.join("\n"))
        }
        CliCommand::Create { file, columns } => {
            let path = resolve(config, &file);
            if path.exists() {
                return Err(system_message(
                    "tafla",
                    format!("{} already exists", highlight_argument(&path.display().to_string())),
                ));
            }

            let (names, kinds) = columns.into_iter().unzip();
            let data = Data::new(&config.data_dir, &file.to_string_lossy(), names, kinds, delimiter)
                .map_err(store_message)?;
            data.update_file().map_err(store_message)?;

            info!("created {}", path.display());
            Ok(system_message(
                "tafla",
                format!("created {} ({})", highlight_argument(&path.display().to_string()), data.schema()),
            ))
        }
        CliCommand::Add {
            file,
            values,
            defaults,
        } => {
            let mut data = open(config, &file, delimiter)?;
            if defaults {
                let row = Row::default_from_types(data.column_kinds());
                data.add_row(row).map_err(store_message)?;
            } else {
                data.add_row_from_strings(values.as_slice()).map_err(store_message)?;
            }

            Ok(system_message(
                "tafla",
                format!("{} row(s) processed!", highlight_argument("1")),
            ))
        }
        CliCommand::Delete { file, index } => {
            let mut data = open(config, &file, delimiter)?;
            let removed = data.del_row(index).map_err(store_message)?;

            Ok(system_message(
                "tafla",
                format!("deleted {}", highlight_argument(&removed.to_string())),
            ))
        }
    }
}

fn resolve(config: &Config, file: &Path) -> PathBuf {
    config.data_dir.join(file)
}

fn open(config: &Config, file: &Path, delimiter: &str) -> Result<Data, String> {
    Data::open(resolve(config, file), delimiter).map_err(store_message)
}

fn store_message(error: StoreError) -> String {
    system_message("tafla", highlight_argument(&error.to_string()))
}

fn rows_to_json(data: &Data) -> Result<String, String> {
    //! Every row becomes an object keyed by column name, in column order.
    //! Values go through their `am_compatible` form so booleans and
    //! timestamps keep their own JSON shape.

    let rows: Vec<IndexMap<&str, serde_json::Value>> = data
        .rows()
        .iter()
        .map(|row| {
            data.column_names()
                .iter()
                .map(String::as_str)
                .zip(row.am_compatible().iter().map(json_value))
                .collect()
        })
        .collect();

    serde_json::to_string_pretty(&rows).map_err(|e| system_message("json", e.to_string()))
}

#[derive(Serialize)]
struct ColumnEntry<'a> {
    name: &'a str,
    kind: ColumnKind,
}

fn schema_to_json(data: &Data) -> Result<String, String> {
    let columns: Vec<ColumnEntry> = data
        .column_names()
        .iter()
        .zip(data.column_kinds())
        .map(|(name, kind)| ColumnEntry {
            name: name.as_str(),
            kind: *kind,
        })
        .collect();

    serde_json::to_string_pretty(&columns).map_err(|e| system_message("json", e.to_string()))
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Boolean(flag) => serde_json::Value::Bool(*flag),
        Value::Timestamp(stamp) => serde_json::Value::String(iso_timestamp(stamp)),
        other => serde_json::Value::String(other.to_string()),
    }
}

fn iso_timestamp(stamp: &NaiveDateTime) -> String {
    stamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
