use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::column::ColumnKind;
use super::error::{Result, StoreError};
use super::row::Row;
use super::schema::Schema;
use crate::config::Config;

pub const DEFAULT_DELIMITER: &str = "|";

/// A table of [`Row`]s kept in sync with a delimited flat file.
///
/// The file is the durable store and this struct is a cache of it. The
/// file starts with two header lines, the type names and then the column
/// names, followed by one line per row in the constructable form of its
/// columns.
///
/// Every row in the table has `num_columns` columns whose kinds equal the
/// table's column kinds position by position. Mutations are validated
/// before anything changes in memory.
///
/// # Issues
/// - A rewrite that fails half way leaves a truncated file behind. There
/// is no atomic rename.
/// - Two tables (or processes) writing the same file will race without
/// noticing.
/// - Values containing the delimiter or a newline are written as is and
/// will not read back.
pub struct Data {
    file_path: PathBuf,
    schema: Schema,
    num_cols: usize,
    rows: Vec<Row>,
    delimiter: String,
}

impl Data {
    pub fn new(
        directory: impl AsRef<Path>,
        filename: &str,
        column_names: Vec<String>,
        column_kinds: Vec<ColumnKind>,
        delimiter: &str,
    ) -> Result<Data> {
        //! Create a table over `directory/filename` and load whatever rows
        //! the file already holds.
        //!
        //! A missing file is an empty table. A file whose header does not
        //! match the schema is an error.

        let schema = Schema::new(column_names, column_kinds)?;
        Data::load(directory.as_ref().join(filename), schema, delimiter)
    }

    pub fn from_config(
        config: &Config,
        filename: &str,
        column_names: Vec<String>,
        column_kinds: Vec<ColumnKind>,
    ) -> Result<Data> {
        //! Same as [`Data::new`], in the configured data directory with
        //! the default `|` delimiter.

        Data::new(
            &config.data_dir,
            filename,
            column_names,
            column_kinds,
            DEFAULT_DELIMITER,
        )
    }

    pub fn open(file_path: impl AsRef<Path>, delimiter: &str) -> Result<Data> {
        //! Open an existing table file, taking the schema from its header.

        check_delimiter(delimiter)?;
        let file_path = file_path.as_ref().to_path_buf();
        let mut lines = BufReader::new(File::open(&file_path)?).lines();
        let type_line = lines.next().transpose()?.unwrap_or_default();
        let name_line = lines.next().transpose()?.unwrap_or_default();

        let schema = Schema::from_header(&file_path, &type_line, &name_line, delimiter)?;
        Data::load(file_path, schema, delimiter)
    }

    fn load(file_path: PathBuf, schema: Schema, delimiter: &str) -> Result<Data> {
        check_delimiter(delimiter)?;
        let mut data = Data {
            file_path,
            num_cols: schema.len(),
            schema,
            rows: vec![],
            delimiter: delimiter.to_string(),
        };
        data.update_cache()?;
        Ok(data)
    }

    pub fn update_cache(&mut self) -> Result<()> {
        //! Reload the rows from the file.
        //!
        //! Every value is read as text and coerced into the declared kind
        //! of its column.

        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!(
                    "{} does not exist, starting with an empty table",
                    self.file_path.display()
                );
                self.rows = vec![];
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        let mut lines = BufReader::new(file).lines();
        let type_line = lines.next().transpose()?.unwrap_or_default();
        let name_line = lines.next().transpose()?.unwrap_or_default();
        self.schema
            .check_header(&self.file_path, &type_line, &name_line, &self.delimiter)?;

        debug!("{}", type_line);
        debug!("{}", name_line);

        let mut rows = vec![];
        for line in lines {
            let line = line?;
            let mut row = Row::new(line.split(self.delimiter.as_str()));
            row.set_types(self.schema.kinds())?;
            rows.push(row);
        }

        self.set_rows(rows)
    }

    pub fn update_file(&self) -> Result<()> {
        //! Rewrite the whole file: both header lines, then every row.

        let mut contents = String::new();
        contents.push_str(&self.schema.type_line(&self.delimiter));
        contents.push('\n');
        contents.push_str(&self.schema.name_line(&self.delimiter));
        contents.push('\n');
        for row in self.rows.iter() {
            contents.push_str(&self.row_line(row));
            contents.push('\n');
        }

        if let Some(directory) = self.file_path.parent() {
            if !directory.as_os_str().is_empty() {
                fs::create_dir_all(directory)?;
            }
        }
        fs::write(&self.file_path, contents)?;

        debug!(
            "rewrote {} with {} row(s)",
            self.file_path.display(),
            self.rows.len()
        );
        Ok(())
    }

    fn append_row_to_file(&self, row: &Row) -> Result<()> {
        // The header is assumed to be on disk already.
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;
        writeln!(file, "{}", self.row_line(row))?;

        debug!("appended a row to {}", self.file_path.display());
        Ok(())
    }

    fn row_line(&self, row: &Row) -> String {
        row.constructable().join(&self.delimiter)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        //! Replace every row in memory. The file is NOT written, call
        //! [`Data::update_file`] to persist the new rows.
        //!
        //! The first row decides the column kinds of the table from here
        //! on and every other row has to match it. Its length must still
        //! equal the number of column names.

        if let Some(first) = rows.first() {
            if first.len() != self.schema.len() {
                return Err(StoreError::RowShape {
                    expected: self.schema.len(),
                    actual: first.len(),
                });
            }

            let kinds = first.kinds();
            for row in rows.iter().skip(1) {
                check_row(row, first.len(), &kinds)?;
            }

            self.num_cols = first.len();
            self.schema.set_kinds(kinds);
        }

        self.rows = rows;
        Ok(())
    }

    pub fn set_row(&mut self, row: Row, index: usize) -> Result<()> {
        //! Replace the row at `index` and rewrite the file.

        self.assert_valid_row(&row)?;
        self.assert_valid_index(index)?;

        self.rows[index] = row;
        self.update_file()
    }

    pub fn del_row(&mut self, index: usize) -> Result<Row> {
        //! Delete the row at `index` and rewrite the file.
        //!
        //! Returns the removed row.

        self.assert_valid_index(index)?;

        let removed = self.rows.remove(index);
        self.update_file()?;
        Ok(removed)
    }

    pub fn add_row(&mut self, row: Row) -> Result<()> {
        //! Add a row at the end of the table.
        //!
        //! The first row of a table rewrites the file so the header gets
        //! written too, later rows are appended as a single line.

        self.assert_valid_row(&row)?;
        self.rows.push(row);

        match self.rows.as_slice() {
            [] | [_] => self.update_file(),
            [.., last] => self.append_row_to_file(last),
        }
    }

    pub fn add_row_from_strings<S: AsRef<str>>(&mut self, values: &[S]) -> Result<()> {
        //! Parse raw strings into the column kinds of the table and add
        //! them as a row.

        let mut row = Row::new(values.iter().map(|value| -> &str { value.as_ref() }));
        row.set_types(self.schema.kinds())?;
        self.add_row(row)
    }

    fn assert_valid_row(&self, row: &Row) -> Result<()> {
        check_row(row, self.num_cols, self.schema.kinds())
    }

    fn assert_valid_index(&self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(StoreError::RowIndex {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn column_names(&self) -> &[String] {
        self.schema.names()
    }

    pub fn column_kinds(&self) -> &[ColumnKind] {
        self.schema.kinds()
    }

    pub fn num_columns(&self) -> usize {
        self.num_cols
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn check_delimiter(delimiter: &str) -> Result<()> {
    if delimiter.is_empty() {
        return Err(StoreError::EmptyDelimiter);
    }
    Ok(())
}

fn check_row(row: &Row, num_cols: usize, kinds: &[ColumnKind]) -> Result<()> {
    if row.len() != num_cols {
        return Err(StoreError::RowShape {
            expected: num_cols,
            actual: row.len(),
        });
    }

    let row_kinds = row.kinds();
    if row_kinds != kinds {
        let join = |kinds: &[ColumnKind]| {
            kinds
                .iter()
                .map(ColumnKind::type_name)
                .collect::<Vec<_>>()
                .join(", ")
        };
        return Err(StoreError::RowType {
            expected: join(kinds),
            actual: join(&row_kinds),
        });
    }

    Ok(())
}

impl Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut widths: Vec<usize> = self
            .column_names()
            .iter()
            .map(|name| name.chars().count())
            .collect();
        for row in self.rows.iter() {
            for (width, row_width) in widths.iter_mut().zip(row.widths()) {
                *width = (*width).max(row_width);
            }
        }

        let pad = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect();
            padded.join(" | ").trim_end().to_string()
        };

        writeln!(f, "{}", pad(self.column_names()))?;
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in self.rows.iter() {
            writeln!(f, "{}", pad(&row.display()))?;
        }

        Ok(())
    }
}
