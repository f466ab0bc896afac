use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tafla::config::Config;
use tafla::persistence::{
    ColumnKind, DEFAULT_DELIMITER, Data, Id, Kennitala, Row, StoreError, Value,
};
use tafla::row;

fn _people(directory: &Path) -> Result<Data, StoreError> {
    Data::new(
        directory,
        "people.txt",
        vec!["name".to_string(), "age".to_string()],
        vec![ColumnKind::Text, ColumnKind::Integer],
        DEFAULT_DELIMITER,
    )
}

fn _all_kinds(directory: &Path, filename: &str) -> Result<Data, StoreError> {
    Data::new(
        directory,
        filename,
        ["text", "number", "ratio", "flag", "when", "id", "kt"]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        ColumnKind::ALL.to_vec(),
        DEFAULT_DELIMITER,
    )
}

fn _stamp(micros: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 5, 17)
        .unwrap()
        .and_hms_micro_opt(8, 30, 0, micros)
        .unwrap()
}

fn _read(data: &Data) -> String {
    fs::read_to_string(data.file_path()).unwrap()
}

#[test]
fn data_missing_file_is_an_empty_table() {
    let directory = tempfile::tempdir().unwrap();
    let data = _people(directory.path()).unwrap();

    assert!(data.is_empty());
    assert_eq!(data.num_columns(), 2);
    assert!(!data.file_path().exists());
}

#[test]
fn data_rejects_mismatched_schema() {
    let directory = tempfile::tempdir().unwrap();
    let data = Data::new(
        directory.path(),
        "people.txt",
        vec!["name".to_string(), "age".to_string()],
        vec![ColumnKind::Text],
        DEFAULT_DELIMITER,
    );

    assert!(matches!(data, Err(StoreError::SchemaShape { names: 2, kinds: 1 })));
}

#[test]
fn data_add_rows_writes_header_then_appends() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = _people(directory.path()).unwrap();

    data.add_row_from_strings(&["Alice", "30"]).unwrap();
    data.add_row_from_strings(&["Bob", "25"]).unwrap();

    assert_eq!(_read(&data), "str|int\nname|age\nAlice|30\nBob|25\n");

    let reloaded = _people(directory.path()).unwrap();
    assert_eq!(reloaded.rows(), &[row!["Alice", 30], row!["Bob", 25]]);
    assert_eq!(
        reloaded.rows()[0].kinds(),
        vec![ColumnKind::Text, ColumnKind::Integer]
    );
}

#[test]
fn data_rejects_a_foreign_header() {
    let directory = tempfile::tempdir().unwrap();
    fs::write(directory.path().join("people.txt"), "str|int\nname|years\n").unwrap();
    assert!(matches!(
        _people(directory.path()),
        Err(StoreError::SchemaMismatch { .. })
    ));

    fs::write(directory.path().join("people.txt"), "str|str\nname|age\n").unwrap();
    assert!(matches!(
        _people(directory.path()),
        Err(StoreError::SchemaMismatch { .. })
    ));
}

#[test]
fn data_propagates_bad_values_on_load() {
    let directory = tempfile::tempdir().unwrap();
    fs::write(
        directory.path().join("people.txt"),
        "str|int\nname|age\nAlice|thirty\n",
    )
    .unwrap();

    assert!(matches!(
        _people(directory.path()),
        Err(StoreError::Coercion { .. })
    ));
}

#[test]
fn data_round_trips_every_kind() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = _all_kinds(directory.path(), "kinds.txt").unwrap();
    let rows = vec![
        row!["first", 1, 0.5, true, _stamp(250), Id::new(), Kennitala::from("0101302989")],
        row!["", -7, 3.0, false, _stamp(0), Id::from("fixed"), Kennitala::default()],
    ];

    for row in rows.iter() {
        data.add_row(row.clone()).unwrap();
    }

    let reloaded = _all_kinds(directory.path(), "kinds.txt").unwrap();
    assert_eq!(reloaded.rows(), rows.as_slice());
}

#[test]
fn data_timestamps_keep_microsecond_precision() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = Data::new(
        directory.path(),
        "times.txt",
        vec!["when".to_string()],
        vec![ColumnKind::Timestamp],
        DEFAULT_DELIMITER,
    )
    .unwrap();
    // nanoseconds beyond the microsecond are not written out
    let precise = _stamp(1) + chrono::Duration::nanoseconds(999);
    data.add_row(row![precise]).unwrap();

    let reloaded = Data::open(data.file_path(), DEFAULT_DELIMITER).unwrap();
    assert_eq!(reloaded.rows()[0][0].value(), &Value::Timestamp(_stamp(1)));
}

#[test]
fn data_update_file_is_idempotent() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = _people(directory.path()).unwrap();
    data.add_row(row!["Alice", 30]).unwrap();
    data.add_row(row!["Bob", 25]).unwrap();

    data.update_file().unwrap();
    let first = _read(&data);
    data.update_file().unwrap();

    assert_eq!(first, _read(&data));
}

#[test]
fn data_append_matches_rewrite() {
    let appended = tempfile::tempdir().unwrap();
    let rewritten = tempfile::tempdir().unwrap();
    let rows = vec![row!["Alice", 30], row!["Bob", 25], row!["Carl", 41]];

    let mut by_append = _people(appended.path()).unwrap();
    for row in rows.iter() {
        by_append.add_row(row.clone()).unwrap();
    }

    let mut by_rewrite = _people(rewritten.path()).unwrap();
    by_rewrite.set_rows(rows).unwrap();
    assert!(!by_rewrite.file_path().exists());
    by_rewrite.update_file().unwrap();

    assert_eq!(_read(&by_append), _read(&by_rewrite));
}

#[test]
fn data_set_and_delete_rewrite_the_file() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = _people(directory.path()).unwrap();
    data.add_row(row!["Alice", 30]).unwrap();
    data.add_row(row!["Bob", 25]).unwrap();

    data.set_row(row!["Bobby", 26], 1).unwrap();
    assert_eq!(_read(&data), "str|int\nname|age\nAlice|30\nBobby|26\n");

    let removed = data.del_row(0).unwrap();
    assert_eq!(removed, row!["Alice", 30]);
    assert_eq!(_read(&data), "str|int\nname|age\nBobby|26\n");
    assert_eq!(data.row(0), Some(&row!["Bobby", 26]));
}

#[test]
fn data_shape_errors_keep_state() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = _people(directory.path()).unwrap();
    data.add_row(row!["Alice", 30]).unwrap();
    let before = _read(&data);

    assert!(matches!(
        data.add_row(row!["Bob", 25, "extra"]),
        Err(StoreError::RowShape { expected: 2, actual: 3 })
    ));
    assert!(matches!(
        data.add_row(row![25, "Bob"]),
        Err(StoreError::RowType { .. })
    ));
    assert!(matches!(
        data.set_row(Row::new(vec!["Bob"]), 0),
        Err(StoreError::RowShape { .. })
    ));

    assert_eq!(data.rows(), &[row!["Alice", 30]]);
    assert_eq!(_read(&data), before);
}

#[test]
fn data_custom_delimiter() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = Data::new(
        directory.path(),
        "semi.csv",
        vec!["name".to_string(), "member".to_string()],
        vec![ColumnKind::Text, ColumnKind::Boolean],
        ";",
    )
    .unwrap();
    data.add_row(row!["Alice", true]).unwrap();

    assert_eq!(_read(&data), "str;bool\nname;member\nAlice;True\n");
    let reopened = Data::open(data.file_path(), ";").unwrap();
    assert_eq!(reopened.column_kinds(), &[ColumnKind::Text, ColumnKind::Boolean]);
    assert_eq!(reopened.rows(), data.rows());
}

#[test]
fn data_open_requires_an_existing_file() {
    let directory = tempfile::tempdir().unwrap();
    let missing = Data::open(directory.path().join("nope.txt"), DEFAULT_DELIMITER);

    assert!(matches!(missing, Err(StoreError::Io(_))));
}

#[test]
fn data_from_config_uses_the_data_dir() {
    let directory = tempfile::tempdir().unwrap();
    let config = Config::default().with_data_dir(directory.path().join("tables"));
    let mut data = Data::from_config(
        &config,
        "people.txt",
        vec!["name".to_string(), "age".to_string()],
        vec![ColumnKind::Text, ColumnKind::Integer],
    )
    .unwrap();
    data.add_row(row!["Alice", 30]).unwrap();

    assert!(directory.path().join("tables").join("people.txt").exists());
    assert_eq!(data.delimiter(), "|");
}

#[test]
fn data_leap_second_timestamps_reload() {
    let directory = tempfile::tempdir().unwrap();
    let mut data = Data::new(
        directory.path(),
        "leap.txt",
        vec!["when".to_string()],
        vec![ColumnKind::Timestamp],
        DEFAULT_DELIMITER,
    )
    .unwrap();
    let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
        .unwrap()
        .and_hms_micro_opt(23, 59, 59, 1_500_000)
        .unwrap();
    data.add_row(row![leap]).unwrap();

    assert_eq!(_read(&data), "datetime\nwhen\n2016,12,31,23,59,59,1500000\n");
    let reloaded = Data::open(data.file_path(), DEFAULT_DELIMITER).unwrap();
    assert_eq!(reloaded.rows(), &[row![leap]]);
}
