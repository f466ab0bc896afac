//! A typed record store kept in delimited flat files.
//!
//! A [`persistence::Data`] table owns rows of typed columns and mirrors
//! them into a text file whose first two lines name the column types and
//! the column names.

pub mod cli;
pub mod config;
pub mod logging;
pub mod persistence;
