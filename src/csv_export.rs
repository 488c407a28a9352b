// src/csv_export.rs

//! CSV export of the full catalog
//!
//! One header row with the catalog's column names, then one row per record
//! in catalog order. Lines end in `\n` on every platform. Blob columns are
//! written as lowercase hex, NULL as an empty field.

use crate::db::Catalog;
use crate::error::Result;
use rusqlite::types::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `catalog` as CSV
///
/// If `destination` is an existing directory the file is created inside it
/// as `file_name`; otherwise `destination` is the file path. Returns the
/// path written.
pub fn export_catalog(catalog: &Catalog, destination: &Path, file_name: &str) -> Result<PathBuf> {
    let path = if destination.is_dir() {
        destination.join(file_name)
    } else {
        destination.to_path_buf()
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)?;

    writer.write_record(&catalog.columns)?;
    for record in &catalog.records {
        writer.write_record(record.column_values().iter().map(render_value))?;
    }
    writer.flush()?;

    info!(
        "Exported {} records ({} columns) to {}",
        catalog.len(),
        catalog.columns.len(),
        path.display()
    );
    Ok(path)
}

/// Text form of one SQLite value
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(bytes) => bytes.iter().map(|b| format!("{:02x}", b)).collect(),
    }
}
