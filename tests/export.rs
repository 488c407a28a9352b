// tests/export.rs

//! CSV export and configuration tests.

mod common;

use common::*;
use manifestdb::config::ViewerConfig;
use manifestdb::csv_export::render_value;
use manifestdb::BackupSession;
use std::fs;

#[test]
fn test_csv_round_trip() {
    let backup = setup_backup();
    let session = BackupSession::open(&backup.db_path, &ViewerConfig::default()).unwrap();
    let out = tempfile::tempdir().unwrap();

    let path = session.export_csv(out.path()).unwrap();
    assert_eq!(path, out.path().join("Manifest.csv"));

    let raw = fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("\r\n"));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, session.catalog().columns);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), session.catalog().len());

    for (row, record) in rows.iter().zip(&session.catalog().records) {
        assert_eq!(&row[0], record.file_id);
        assert_eq!(&row[1], record.domain);
        assert_eq!(&row[2], record.relative_path);
        assert_eq!(&row[3], record.flags.to_string());
        assert_eq!(
            &row[4],
            render_value(&rusqlite::types::Value::Blob(record.metadata.clone()))
        );
    }
}

#[test]
fn test_csv_export_to_named_file() {
    let backup = setup_backup();
    let session = BackupSession::open(&backup.db_path, &ViewerConfig::default()).unwrap();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("catalog.csv");

    let path = session.export_csv(&target).unwrap();
    assert_eq!(path, target);
    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content.lines().count(), catalog_rows().len() + 1);
}

#[test]
fn test_csv_file_name_from_config() {
    let backup = setup_backup();
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("config.toml");
    fs::write(&config_path, "csv_file_name = \"files.csv\"\n").unwrap();

    let config = ViewerConfig::load_or_default(Some(&config_path)).unwrap();
    let session = BackupSession::open(&backup.db_path, &config).unwrap();
    let out = tempfile::tempdir().unwrap();

    let path = session.export_csv(out.path()).unwrap();
    assert_eq!(path, out.path().join("files.csv"));
    assert!(!out.path().join("Manifest.csv").exists());
}

#[test]
fn test_extra_columns_are_exported() {
    let backup = setup_backup();
    let conn = rusqlite::Connection::open(&backup.db_path).unwrap();
    conn.execute_batch(
        "ALTER TABLE Files ADD COLUMN note TEXT;
         UPDATE Files SET note = 'flagged' WHERE fileID = (SELECT fileID FROM Files WHERE flags = 1 LIMIT 1);",
    )
    .unwrap();
    drop(conn);

    let session = BackupSession::open(&backup.db_path, &ViewerConfig::default()).unwrap();
    assert_eq!(session.catalog().columns.len(), 6);
    let out = tempfile::tempdir().unwrap();
    let path = session.export_csv(out.path()).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(&reader.headers().unwrap()[5], "note");
    let notes: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[5].to_string())
        .filter(|n| !n.is_empty())
        .collect();
    assert_eq!(notes, vec!["flagged"]);
}
