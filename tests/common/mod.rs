// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use plist::{Date, Dictionary, Uid, Value};
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

pub const HOME_DOMAIN: &str = "HomeDomain";
pub const APP_DOMAIN: &str = "AppDomain-com.example.notes";
pub const DIR_ONLY_DOMAIN: &str = "SystemPreferencesDomain";
pub const CAMERA_DOMAIN: &str = "CameraRollDomain";

pub const NOTES_ID: &str = "aa1f5c0e3b7d9a2c4e6f8b0d1a3c5e7f9b2d4f60";
pub const PREFS_ID: &str = "3d0d7e5fb2ce288813306e4d4636395e047a3d28";
pub const APP_FIRST_ID: &str = "5e2b8c4d6f0a1b3c5d7e9f1a2b4c6d8e0f1a3b5c";
pub const APP_MISSING_ID: &str = "7c4e1a9b3d5f7a9c1e3b5d7f9a1c3e5b7d9f1a3c";
pub const APP_THIRD_ID: &str = "9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d3e2f1a0b";
pub const CAMERA_ID: &str = "b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e9f8a7b6c5";

pub const NOTES_CONTENT: &[u8] = b"Shopping list\n- milk\n- eggs\n";
pub const PREFS_CONTENT: &[u8] = b"bplist00 pretend preferences";
pub const APP_FIRST_CONTENT: &[u8] = b"first document";
pub const APP_THIRD_CONTENT: &[u8] = b"third document, slightly longer";
pub const CAMERA_CONTENT: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";

/// Epoch seconds used for every LastModified attribute
pub const MODIFIED_EPOCH: i64 = 1_600_000_000;

/// One catalog row: (fileID, domain, relativePath, flags, payload)
pub type Row = (&'static str, &'static str, &'static str, i64, Option<&'static [u8]>);

/// Catalog rows in insertion order
pub fn catalog_rows() -> Vec<Row> {
    vec![
        ("0f9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c4b3a2f1e", HOME_DOMAIN, "", 2, None),
        (NOTES_ID, HOME_DOMAIN, "Library/Notes/notes.txt", 1, Some(NOTES_CONTENT)),
        ("1e2d3c4b5a6f7e8d9c0b1a2f3e4d5c6b7a8f9e0d", HOME_DOMAIN, "Library/Notes", 2, None),
        ("2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b", APP_DOMAIN, "", 2, None),
        (PREFS_ID, HOME_DOMAIN, "Library/Preferences/com.example.plist", 1, Some(PREFS_CONTENT)),
        (APP_FIRST_ID, APP_DOMAIN, "Documents/first.txt", 1, Some(APP_FIRST_CONTENT)),
        (APP_MISSING_ID, APP_DOMAIN, "Documents/missing.txt", 1, None),
        ("4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3c", APP_DOMAIN, "Documents", 2, None),
        (APP_THIRD_ID, APP_DOMAIN, "Documents/deep/third.txt", 1, Some(APP_THIRD_CONTENT)),
        ("6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e", DIR_ONLY_DOMAIN, "", 2, None),
        ("8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a", DIR_ONLY_DOMAIN, "Library", 2, None),
        ("c1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c9d0", DIR_ONLY_DOMAIN, "Library/Caches", 2, None),
        (CAMERA_ID, CAMERA_DOMAIN, "Media/DCIM/100APPLE/IMG_0001.JPG", 1, Some(CAMERA_CONTENT)),
        ("d0c1b2a3f4e5d6c7b8a9f0e1d2c3b4a5f6e7d8c9", HOME_DOMAIN, "", 2, None),
    ]
}

/// A backup directory laid out like a real device backup.
///
/// Keep the struct alive to prevent cleanup.
pub struct FixtureBackup {
    pub dir: TempDir,
    pub db_path: PathBuf,
}

impl FixtureBackup {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Build a complete backup: catalog, sharded payloads and both plists.
pub fn setup_backup() -> FixtureBackup {
    let backup = setup_catalog_only();
    write_manifest_plist(backup.root());
    write_status_plist(backup.root());
    backup
}

/// Build a backup with a catalog and payloads but no property lists.
pub fn setup_catalog_only() -> FixtureBackup {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("Manifest.db");

    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE Files (fileID TEXT PRIMARY KEY, domain TEXT, relativePath TEXT, flags INTEGER, file BLOB);
         CREATE INDEX FilesDomainIdx ON Files(domain);",
    )
    .unwrap();

    for (file_id, domain, relative_path, flags, payload) in catalog_rows() {
        let size = payload.map(|p| p.len() as i64).unwrap_or(0);
        conn.execute(
            "INSERT INTO Files (fileID, domain, relativePath, flags, file) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![file_id, domain, relative_path, flags, metadata_blob(relative_path, size)],
        )
        .unwrap();

        if let Some(content) = payload {
            write_payload(dir.path(), file_id, content);
        }
    }
    drop(conn);

    FixtureBackup { dir, db_path }
}

/// Append rows (and their payloads) to an existing fixture catalog
pub fn add_rows(backup: &FixtureBackup, rows: &[Row]) {
    let conn = Connection::open(&backup.db_path).unwrap();
    for (file_id, domain, relative_path, flags, payload) in rows {
        let size = payload.map(|p| p.len() as i64).unwrap_or(0);
        conn.execute(
            "INSERT INTO Files (fileID, domain, relativePath, flags, file) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![file_id, domain, relative_path, flags, metadata_blob(relative_path, size)],
        )
        .unwrap();

        if let Some(content) = payload {
            write_payload(backup.root(), file_id, content);
        }
    }
}

/// Write a payload at `root/<id[0..2]>/<id>`
pub fn write_payload(root: &Path, file_id: &str, content: &[u8]) {
    let shard = root.join(&file_id[..2]);
    fs::create_dir_all(&shard).unwrap();
    fs::write(shard.join(file_id), content).unwrap();
}

/// Keyed-archive metadata blob, shaped like the ones a device writes
pub fn metadata_blob(relative_path: &str, size: i64) -> Vec<u8> {
    let mut file = Dictionary::new();
    file.insert("$class".to_string(), Value::Uid(Uid::new(3)));
    file.insert("Birth".to_string(), Value::Integer(MODIFIED_EPOCH.into()));
    file.insert("LastModified".to_string(), Value::Integer(MODIFIED_EPOCH.into()));
    file.insert("LastStatusChange".to_string(), Value::Integer(MODIFIED_EPOCH.into()));
    file.insert("Mode".to_string(), Value::Integer(33188i64.into()));
    file.insert("RelativePath".to_string(), Value::Uid(Uid::new(2)));
    file.insert("Size".to_string(), Value::Integer(size.into()));
    file.insert("UserID".to_string(), Value::Integer(501i64.into()));

    let mut class = Dictionary::new();
    class.insert("$classname".to_string(), Value::String("MBFile".to_string()));

    let objects = vec![
        Value::String("$null".to_string()),
        Value::Dictionary(file),
        Value::String(relative_path.to_string()),
        Value::Dictionary(class),
    ];

    let mut root = Dictionary::new();
    root.insert("$version".to_string(), Value::Integer(100000i64.into()));
    root.insert("$archiver".to_string(), Value::String("NSKeyedArchiver".to_string()));
    root.insert("$objects".to_string(), Value::Array(objects));

    let mut buf = Vec::new();
    Value::Dictionary(root).to_writer_binary(&mut buf).unwrap();
    buf
}

pub fn write_manifest_plist(root: &Path) {
    let mut apps = Dictionary::new();
    apps.insert("com.example.notes".to_string(), Value::Dictionary(Dictionary::new()));

    let mut lockdown = Dictionary::new();
    lockdown.insert("DeviceName".to_string(), Value::String("Test iPhone".to_string()));
    lockdown.insert("ProductVersion".to_string(), Value::String("17.4".to_string()));
    lockdown.insert("SerialNumber".to_string(), Value::String("F00DBABE1234".to_string()));
    let mut nested = Dictionary::new();
    nested.insert("Backup".to_string(), Value::String("hidden-value".to_string()));
    lockdown.insert("com.apple.mobile.backup".to_string(), Value::Dictionary(nested));

    let mut manifest = Dictionary::new();
    manifest.insert("Version".to_string(), Value::String("10.0".to_string()));
    manifest.insert("IsEncrypted".to_string(), Value::Boolean(false));
    manifest.insert("Applications".to_string(), Value::Dictionary(apps));
    manifest.insert("BackupKeyBag".to_string(), Value::Data(vec![0xde, 0xad, 0xbe, 0xef]));
    manifest.insert("Lockdown".to_string(), Value::Dictionary(lockdown));

    Value::Dictionary(manifest)
        .to_file_binary(root.join("Manifest.plist"))
        .unwrap();
}

pub fn write_status_plist(root: &Path) {
    let date = SystemTime::UNIX_EPOCH + Duration::from_secs(MODIFIED_EPOCH as u64);

    let mut status = Dictionary::new();
    status.insert("SnapshotState".to_string(), Value::String("finished".to_string()));
    status.insert("IsFullBackup".to_string(), Value::Boolean(false));
    status.insert("Version".to_string(), Value::String("3.3".to_string()));
    status.insert("Date".to_string(), Value::Date(Date::from(date)));

    Value::Dictionary(status)
        .to_file_binary(root.join("Status.plist"))
        .unwrap();
}

/// Every path under `root`, excluding `root` itself
pub fn entries_under(root: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap().into_path())
        .collect()
}
