// src/db/mod.rs

//! Catalog store: read-only access to a backup's `Manifest.db`
//!
//! The catalog is a single SQLite table (`Files`). It is loaded into memory
//! once per opened backup with an unrestricted scan; all filtering happens
//! above this layer.

pub mod models;
pub mod paths;

use crate::error::{Error, Result};
use models::{CatalogRecord, CORE_COLUMNS};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the file table inside the catalog database
pub const FILES_TABLE: &str = "Files";

/// Fully materialized catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Column names in table order, used as the CSV header
    pub columns: Vec<String>,
    /// Rows in catalog order
    pub records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn new(columns: Vec<String>, records: Vec<CatalogRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by its file identifier
    pub fn find_by_file_id(&self, file_id: &str) -> Option<&CatalogRecord> {
        self.records.iter().find(|r| r.file_id == file_id)
    }
}

/// Open a catalog database and load every row of its file table
///
/// The connection is opened read-only and closed before returning, whether
/// the scan succeeded or not.
pub fn open_catalog(db_path: impl AsRef<Path>) -> Result<Catalog> {
    let db_path = db_path.as_ref();
    let path_str = db_path.display().to_string();

    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| Error::CatalogOpen {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;
    debug!("Opened catalog connection: {}", path_str);

    let result = read_files_table(&conn);

    if let Err((_, e)) = conn.close() {
        warn!("Failed to close catalog {}: {}", path_str, e);
    } else {
        debug!("Closed catalog connection: {}", path_str);
    }

    match result {
        Ok(catalog) => {
            info!(
                "Loaded catalog {} ({} records, {} columns)",
                path_str,
                catalog.records.len(),
                catalog.columns.len()
            );
            Ok(catalog)
        }
        Err(e) => Err(Error::CatalogOpen {
            path: path_str,
            reason: e,
        }),
    }
}

/// Scan the file table; errors are returned as messages for `CatalogOpen`
fn read_files_table(conn: &Connection) -> std::result::Result<Catalog, String> {
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {}", FILES_TABLE))
        .map_err(|e| e.to_string())?;

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let column_count = columns.len();
    if column_count < CORE_COLUMNS {
        return Err(format!(
            "table {} has {} columns, expected at least {}",
            FILES_TABLE, column_count, CORE_COLUMNS
        ));
    }

    let records = stmt
        .query_map([], |row| CatalogRecord::from_row(row, column_count))
        .map_err(|e| e.to_string())?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    Ok(Catalog::new(columns, records))
}
