//! Error types for the record store.

use std::path::PathBuf;

use thiserror::Error;

use super::column::ColumnKind;

/// Everything that can go wrong while shaping, coercing or persisting rows.
///
/// None of these are recovered from internally. A missing backing file at
/// load time is the only condition the store treats as normal (an empty
/// table), so it never shows up here.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Column names and column kinds given to a table disagree in length.
    #[error("invalid schema: {names} column names but {kinds} column types")]
    SchemaShape { names: usize, kinds: usize },

    /// A table needs at least one column.
    #[error("invalid arguments: 0 columns does not make a schema")]
    EmptySchema,

    /// An empty delimiter cannot separate columns.
    #[error("invalid delimiter: cannot be empty")]
    EmptyDelimiter,

    /// The header of a backing file does not match the declared schema.
    #[error("invalid header in {}: {reason}", .path.display())]
    SchemaMismatch { path: PathBuf, reason: String },

    /// A row has a different number of columns than the table.
    #[error("invalid row length {actual}: table has {expected} columns")]
    RowShape { expected: usize, actual: usize },

    /// A row's column kinds differ from the table's column kinds.
    #[error("invalid row types [{actual}]: table expects [{expected}]")]
    RowType { expected: String, actual: String },

    /// A row index outside the table.
    #[error("invalid row index {index}: table has {len} rows")]
    RowIndex { index: usize, len: usize },

    /// A value could not be converted to another column kind.
    #[error("invalid value {value:?}: not compatible with type {target}, {reason}")]
    Coercion {
        value: String,
        target: ColumnKind,
        reason: String,
    },

    /// A header type name that no column kind answers to.
    #[error("invalid datatype {0}: not supported")]
    UnknownColumnKind(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
