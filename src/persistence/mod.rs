//! Persistence as flat files needs the following components
//! - Column (a single typed value, converts itself between kinds)
//! - Row (fixed length sequence of columns)
//! - Schema (mapping of column names to kinds, order is important)
//! - Data (rows bound to a schema, mirrored into a delimited file)
//!

//  All modules of this lib
mod column;
mod data;
mod error;
mod identifiers;
mod row;
mod schema;

//  External API
pub use column::{Column, ColumnKind, Value};
pub use data::{DEFAULT_DELIMITER, Data};
pub use error::{Result, StoreError};
pub use identifiers::{Id, Kennitala};
pub use row::Row;
pub use schema::Schema;
