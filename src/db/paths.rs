// src/db/paths.rs
//! Centralized path derivation for a backup directory

use std::path::{Path, PathBuf};

/// File name of the catalog database inside a backup directory
pub const CATALOG_FILE: &str = "Manifest.db";

/// Backup-level metadata written next to the catalog
pub const MANIFEST_PLIST: &str = "Manifest.plist";
pub const STATUS_PLIST: &str = "Status.plist";

/// Get the backup root (the directory containing the catalog)
///
/// A bare file name resolves to the current directory.
pub fn backup_root(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Get the path of Manifest.plist for a catalog
pub fn manifest_plist(db_path: &Path) -> PathBuf {
    backup_root(db_path).join(MANIFEST_PLIST)
}

/// Get the path of Status.plist for a catalog
pub fn status_plist(db_path: &Path) -> PathBuf {
    backup_root(db_path).join(STATUS_PLIST)
}

/// Accept either a backup directory or the catalog file itself
pub fn catalog_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CATALOG_FILE)
    } else {
        path.to_path_buf()
    }
}
