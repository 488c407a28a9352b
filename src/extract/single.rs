// src/extract/single.rs

//! Single-record copy, outside the bulk pipeline

use crate::db::models::CatalogRecord;
use crate::error::{Error, Result};
use crate::filesystem::{copy_chunked, PayloadLocator};
use std::path::{Path, PathBuf};
use tracing::info;

/// Copy one record's payload to `destination_file`
///
/// Only regular files have a payload; anything else is refused before the
/// destination is touched. Returns the number of bytes written.
pub fn copy_single_record(
    record: &CatalogRecord,
    locator: &PayloadLocator,
    destination_file: &Path,
    chunk_size: usize,
) -> Result<u64> {
    if !record.is_regular_file() {
        return Err(Error::NotRegularFile(record.file_id.clone()));
    }

    let source = locator.payload_path(&record.file_id);
    let written = copy_chunked(&source, destination_file, chunk_size)?;
    info!(
        "Copied {} ({} bytes) to {}",
        record.relative_path,
        written,
        destination_file.display()
    );
    Ok(written)
}

/// Copy one record into `folder`, named after the last path component
pub fn copy_record_into(
    record: &CatalogRecord,
    locator: &PayloadLocator,
    folder: &Path,
    chunk_size: usize,
) -> Result<PathBuf> {
    let name = record.file_name();
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::InvalidPath(record.relative_path.clone()));
    }

    let target = folder.join(name);
    copy_single_record(record, locator, &target, chunk_size)?;
    Ok(target)
}
