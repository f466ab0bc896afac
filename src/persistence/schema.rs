use std::fmt::Display;
use std::path::Path;

use super::column::ColumnKind;
use super::error::{Result, StoreError};

/// Column names bound to their [`ColumnKind`]s, order is important.
///
/// A schema is what the two header lines of a table file spell out: the
/// type names on the first line and the column names on the second.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    names: Vec<String>,
    kinds: Vec<ColumnKind>,
}

impl Schema {
    pub fn new(names: Vec<String>, kinds: Vec<ColumnKind>) -> Result<Schema> {
        //! Create a schema from column names and their kinds.
        //!
        //! Fails when the two lists are not the same length or when there
        //! are no columns at all.

        if names.is_empty() && kinds.is_empty() {
            return Err(StoreError::EmptySchema);
        }
        if names.len() != kinds.len() {
            return Err(StoreError::SchemaShape {
                names: names.len(),
                kinds: kinds.len(),
            });
        }

        Ok(Schema { names, kinds })
    }

    pub fn from_header(path: &Path, type_line: &str, name_line: &str, delimiter: &str) -> Result<Schema> {
        //! Read a schema back out of the two header lines of a file.

        let kinds = type_line
            .split(delimiter)
            .map(ColumnKind::from_type_name)
            .collect::<Result<Vec<ColumnKind>>>()?;
        let names: Vec<String> = name_line.split(delimiter).map(str::to_string).collect();

        Schema::new(names, kinds).map_err(|e| StoreError::SchemaMismatch {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(super) fn set_kinds(&mut self, kinds: Vec<ColumnKind>) {
        self.kinds = kinds;
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(ColumnKind::type_name).collect()
    }

    pub fn type_line(&self, delimiter: &str) -> String {
        self.type_names().join(delimiter)
    }

    pub fn name_line(&self, delimiter: &str) -> String {
        self.names.join(delimiter)
    }

    pub fn check_header(&self, path: &Path, type_line: &str, name_line: &str, delimiter: &str) -> Result<()> {
        //! Compare the header of a file with this schema. Column names are
        //! checked before the type names.

        let names: Vec<&str> = name_line.split(delimiter).collect();
        if names != self.names {
            return Err(StoreError::SchemaMismatch {
                path: path.to_path_buf(),
                reason: format!("file has invalid column names [{}]", names.join(", ")),
            });
        }

        let type_names: Vec<&str> = type_line.split(delimiter).collect();
        if type_names != self.type_names() {
            return Err(StoreError::SchemaMismatch {
                path: path.to_path_buf(),
                reason: format!("file has invalid column types [{}]", type_names.join(", ")),
            });
        }

        Ok(())
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self
            .names
            .iter()
            .zip(&self.kinds)
            .map(|(name, kind)| format!("{} ({})", name, kind))
            .collect();
        write!(f, "{}", schema.join(" | "))
    }
}
