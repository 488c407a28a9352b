// src/extract/plan.rs

//! Scanning phase: precondition checks and payload sizing

use super::{ExtractionItem, ExtractionReport};
use crate::db::models::CatalogRecord;
use crate::error::{Error, Result};
use crate::filesystem::PayloadLocator;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a successful scan, ready to be copied
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    pub(super) destination: PathBuf,
    pub(super) items: Vec<ExtractionItem>,
    pub(super) total_bytes: u64,
    pub(super) skipped: usize,
}

impl ExtractionPlan {
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn items(&self) -> &[ExtractionItem] {
        &self.items
    }

    /// Sum of the scanned payload sizes
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Records left out because they are not regular files
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// True when there is nothing to copy
    ///
    /// Judged by scanned bytes, not items: a plan made only of zero-byte or
    /// unstatable payloads finishes without touching the destination.
    pub fn is_empty(&self) -> bool {
        self.total_bytes == 0
    }

    pub(super) fn empty_report(&self) -> ExtractionReport {
        ExtractionReport::empty(self.destination.clone())
    }
}

/// Scan a displayed record set for extraction into `destination`
///
/// Refuses an empty selection and a destination that already has entries,
/// before touching the filesystem. Directory and symlink records are
/// skipped. A payload that cannot be stat'ed stays in the plan with size 0;
/// its copy attempt will fail and be counted.
pub fn scan(
    records: &[&CatalogRecord],
    locator: &PayloadLocator,
    destination: &Path,
) -> Result<ExtractionPlan> {
    if records.is_empty() {
        return Err(Error::NoSelection);
    }

    if fs::read_dir(destination)?.next().is_some() {
        return Err(Error::DestinationNotEmpty(
            destination.display().to_string(),
        ));
    }

    let mut items = Vec::new();
    let mut total_bytes: u64 = 0;
    let mut skipped = 0;

    for record in records {
        if !record.is_regular_file() {
            skipped += 1;
            continue;
        }

        let source = locator.payload_path(&record.file_id);
        let size_bytes = match locator.payload_size(&record.file_id) {
            Ok(size) => size,
            Err(e) => {
                warn!(
                    "Cannot stat payload for {} ({}): {}",
                    record.relative_path,
                    source.display(),
                    e
                );
                0
            }
        };
        total_bytes += size_bytes;

        items.push(ExtractionItem {
            file_id: record.file_id.clone(),
            relative_path: record.relative_path.clone(),
            flags: record.flags,
            source,
            size_bytes,
        });
    }

    debug!(
        "Scan skipped {} non-file records of {}",
        skipped,
        records.len()
    );
    info!(
        "Scanned {} files ({} bytes) for extraction to {}",
        items.len(),
        total_bytes,
        destination.display()
    );

    Ok(ExtractionPlan {
        destination: destination.to_path_buf(),
        items,
        total_bytes,
        skipped,
    })
}
