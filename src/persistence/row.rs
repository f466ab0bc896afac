use std::fmt::Display;
use std::ops::{Index, IndexMut};

use super::column::{Column, ColumnKind, Value};
use super::error::Result;

/// An ordered sequence of [`Column`]s.
///
/// Raw values are boxed into columns on the way in, so a row only ever
/// holds columns. The length is fixed once the row is built, [`Row::remove`]
/// being the exception a caller has to be careful with when the row belongs
/// to a [`super::Data`] table.
#[derive(Clone, Debug, PartialEq)]
pub struct Row(Vec<Column>);

/// Build a [`Row`] out of heterogeneous values.
///
/// ```
/// let row = tafla::row!["Alice", 30, true];
/// assert_eq!(row.len(), 3);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::persistence::Row::new(Vec::<$crate::persistence::Column>::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::persistence::Row::new(vec![$($crate::persistence::Column::from($value)),*])
    };
}

impl Row {
    pub fn new<I, C>(columns: I) -> Row
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Row(columns.into_iter().map(Into::into).collect())
    }

    pub fn default_from_types(kinds: &[ColumnKind]) -> Row {
        //! A row holding the default value of every kind, in order.

        Row(kinds.iter().map(|kind| Column::from(kind.default_value())).collect())
    }

    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    pub fn values(&self) -> Vec<&Value> {
        self.0.iter().map(Column::value).collect()
    }

    pub fn kinds(&self) -> Vec<ColumnKind> {
        self.0.iter().map(Column::kind).collect()
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.0.iter().map(Column::type_name).collect()
    }

    pub fn widths(&self) -> Vec<usize> {
        self.0.iter().map(Column::width).collect()
    }

    pub fn display(&self) -> Vec<String> {
        self.0.iter().map(Column::display).collect()
    }

    pub fn constructable(&self) -> Vec<String> {
        self.0.iter().map(Column::constructable).collect()
    }

    pub fn am_compatible(&self) -> Vec<Value> {
        self.0.iter().map(Column::am_compatible).collect()
    }

    pub fn set_types(&mut self, kinds: &[ColumnKind]) -> Result<()> {
        //! Coerce each column to the kind at the same position.
        //!
        //! Only the overlapping prefix is touched when the lengths differ.
        //! The first failure is returned, with the columns before it left
        //! already coerced.

        for (column, kind) in self.0.iter_mut().zip(kinds) {
            column.set_type(*kind)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.0.get_mut(index)
    }

    pub fn set(&mut self, index: usize, column: impl Into<Column>) {
        //! Replace the column at `index`.
        //!
        //! # Panics
        //! Panics if `index` is out of bounds.

        self.0[index] = column.into();
    }

    pub fn remove(&mut self, index: usize) -> Column {
        //! Take the column at `index` out, shifting the rest to the left.
        //!
        //! # Panics
        //! Panics if `index` is out of bounds.

        self.0.remove(index)
    }
}

impl Index<usize> for Row {
    type Output = Column;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Row {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display().join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{Id, Kennitala};

    #[test]
    fn raw_values_are_boxed_into_columns() {
        let row = Row::new(vec!["Alice", "30"]);
        assert_eq!(row.kinds(), vec![ColumnKind::Text, ColumnKind::Text]);

        let mixed = crate::row!["Bob", 25, Column::new(false)];
        assert_eq!(
            mixed.kinds(),
            vec![ColumnKind::Text, ColumnKind::Integer, ColumnKind::Boolean]
        );
        assert_eq!(mixed.type_names(), vec!["str", "int", "bool"]);
    }

    #[test]
    fn set_types_coerces_positionally() {
        let mut row = Row::new(vec!["Alice", "30"]);
        row.set_types(&[ColumnKind::Text, ColumnKind::Integer]).unwrap();

        assert_eq!(
            row.values(),
            vec![&Value::Text("Alice".to_string()), &Value::Integer(30)]
        );
    }

    #[test]
    fn set_types_truncates_to_the_shorter_side() {
        let mut row = Row::new(vec!["1", "2", "3"]);
        row.set_types(&[ColumnKind::Integer]).unwrap();
        assert_eq!(
            row.kinds(),
            vec![ColumnKind::Integer, ColumnKind::Text, ColumnKind::Text]
        );
    }

    #[test]
    fn projections_line_up_with_columns() {
        let row = crate::row!["Sóley", 1.5];
        assert_eq!(row.display(), vec!["Sóley".to_string(), "1.5".to_string()]);
        assert_eq!(row.widths(), vec![5, 3]);
        assert_eq!(row.constructable(), vec!["Sóley".to_string(), "1.5".to_string()]);
        assert_eq!(row.to_string(), "Sóley | 1.5");
    }

    #[test]
    fn default_row_follows_the_kinds() {
        let kinds = [
            ColumnKind::Text,
            ColumnKind::Integer,
            ColumnKind::Float,
            ColumnKind::Boolean,
            ColumnKind::Timestamp,
            ColumnKind::Id,
            ColumnKind::Kennitala,
        ];
        let row = Row::default_from_types(&kinds);

        assert_eq!(row.kinds(), kinds.to_vec());
        assert_eq!(row[0].value(), &Value::Text(String::new()));
        assert_eq!(row[1].value(), &Value::Integer(0));
        assert_eq!(row[3].value(), &Value::Boolean(false));
        assert_eq!(row[6].value(), &Value::Kennitala(Kennitala::default()));
        assert_ne!(row[5].value(), &Value::Id(Id::from("")));
    }

    #[test]
    fn empty_row_macro() {
        let row = crate::row![];
        assert!(row.is_empty());
        assert_eq!(row, Row::default_from_types(&[]));
    }

    #[test]
    #[should_panic]
    fn set_out_of_bounds_panics() {
        let mut row = crate::row!["a"];
        row.set(1, "b");
    }

    #[test]
    fn index_set_and_remove() {
        let mut row = crate::row!["a", "b", "c"];
        row[0].set_value("z");
        row.set(1, 9);
        let removed = row.remove(2);

        assert_eq!(removed.value(), &Value::Text("c".to_string()));
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1).map(Column::kind), Some(ColumnKind::Integer));
        assert_eq!(row.get(2), None);
        assert_eq!(row.to_string(), "z | 9");
    }
}
