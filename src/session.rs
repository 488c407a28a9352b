// src/session.rs

//! Backup session: everything known about one opened backup
//!
//! A session is built in one step from a catalog path. If opening fails the
//! caller keeps whatever session it had before; there is no half-open state.
//! The session also remembers which domain is currently displayed, since
//! row numbers and bulk extraction both refer to that record set.

use crate::backup_info::{manifest_report, status_report};
use crate::config::ViewerConfig;
use crate::csv_export::export_catalog;
use crate::db::models::CatalogRecord;
use crate::db::{open_catalog, paths, Catalog};
use crate::domain::{build_naked_domain_list, domain_rows, find_first_match};
use crate::error::{Error, Result};
use crate::extract::{copy_record_into, scan, ExtractionHandle, ExtractionPlan};
use crate::filesystem::PayloadLocator;
use crate::metadata::file_info_report;
use crate::property::{read_property_list, PropertyNode};
use crate::report::Report;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Currently displayed record set
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    domain: String,
    /// Indices into the catalog, in catalog order
    rows: Vec<usize>,
}

#[derive(Debug)]
pub struct BackupSession {
    db_path: PathBuf,
    locator: PayloadLocator,
    catalog: Catalog,
    naked_domains: Vec<String>,
    manifest: Option<PropertyNode>,
    status: Option<PropertyNode>,
    selection: Option<Selection>,
    config: ViewerConfig,
}

impl BackupSession {
    /// Open a backup from its catalog file or its directory
    ///
    /// Only the catalog is required. `Manifest.plist` and `Status.plist`
    /// are read if present; a failure there is logged and leaves that
    /// report unavailable.
    pub fn open(path: impl AsRef<Path>, config: &ViewerConfig) -> Result<Self> {
        let db_path = paths::catalog_path(path.as_ref());
        let catalog = open_catalog(&db_path)?;
        let backup_root = paths::backup_root(&db_path);
        let naked_domains = build_naked_domain_list(&catalog.records, config.dedupe_naked_domains);

        let manifest = load_optional(&paths::manifest_plist(&db_path));
        let status = load_optional(&paths::status_plist(&db_path));

        info!(
            "Opened backup {} ({} records, {} domains)",
            backup_root.display(),
            catalog.len(),
            naked_domains.len()
        );

        Ok(Self {
            locator: PayloadLocator::new(&backup_root),
            db_path,
            catalog,
            naked_domains,
            manifest,
            status,
            selection: None,
            config: config.clone(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn backup_root(&self) -> &Path {
        self.locator.backup_root()
    }

    pub fn locator(&self) -> &PayloadLocator {
        &self.locator
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Sorted naked-domain names offered for selection
    pub fn naked_domains(&self) -> &[String] {
        &self.naked_domains
    }

    pub fn manifest(&self) -> Option<&PropertyNode> {
        self.manifest.as_ref()
    }

    pub fn status(&self) -> Option<&PropertyNode> {
        self.status.as_ref()
    }

    /// First naked domain containing `search`, with its list position
    pub fn find_domain(&self, search: &str) -> Option<(usize, &str)> {
        find_first_match(&self.naked_domains, search)
    }

    /// Display every record of `domain`; returns how many are shown
    ///
    /// A domain with no records at all is refused and the previous
    /// selection is kept.
    pub fn select_domain(&mut self, domain: &str) -> Result<usize> {
        let rows = domain_rows(&self.catalog.records, domain);
        if rows.is_empty() {
            return Err(Error::UnknownDomain(domain.to_string()));
        }
        let count = rows.len();

        self.selection = Some(Selection {
            domain: domain.to_string(),
            rows,
        });
        Ok(count)
    }

    /// Name of the displayed domain, if any
    pub fn selected_domain(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.domain.as_str())
    }

    /// Displayed records in catalog order (empty with no selection)
    pub fn displayed_records(&self) -> Vec<&CatalogRecord> {
        match &self.selection {
            Some(selection) => selection
                .rows
                .iter()
                .filter_map(|&idx| self.catalog.records.get(idx))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Displayed record at zero-based `row`
    pub fn record_at(&self, row: usize) -> Result<&CatalogRecord> {
        self.selection
            .as_ref()
            .and_then(|s| s.rows.get(row))
            .and_then(|&idx| self.catalog.records.get(idx))
            .ok_or_else(|| Error::RecordNotFound(format!("row {}", row + 1)))
    }

    /// Detail report for a displayed row
    pub fn file_info(&self, row: usize) -> Result<Report> {
        file_info_report(self.record_at(row)?, self.config.timestamps)
    }

    /// Copy a displayed row into `folder` under its base name
    pub fn copy_row(&self, row: usize, folder: &Path) -> Result<PathBuf> {
        let record = self.record_at(row)?;
        copy_record_into(record, &self.locator, folder, self.config.copy_chunk_size)
    }

    /// Copy the record with `file_id` into `folder` under its base name
    pub fn copy_file_id(&self, file_id: &str, folder: &Path) -> Result<PathBuf> {
        let record = self
            .catalog
            .find_by_file_id(file_id)
            .ok_or_else(|| Error::RecordNotFound(file_id.to_string()))?;
        copy_record_into(record, &self.locator, folder, self.config.copy_chunk_size)
    }

    /// Scan the displayed records for extraction into `destination`
    pub fn plan_extraction(&self, destination: &Path) -> Result<ExtractionPlan> {
        scan(&self.displayed_records(), &self.locator, destination)
    }

    /// Scan, then start copying the displayed records on a background thread
    pub fn start_extraction(&self, destination: &Path) -> Result<ExtractionHandle> {
        self.plan_extraction(destination)?
            .spawn(self.config.extract_options())
    }

    /// Export the whole catalog as CSV
    pub fn export_csv(&self, destination: &Path) -> Result<PathBuf> {
        export_catalog(&self.catalog, destination, &self.config.csv_file_name)
    }

    /// Manifest.plist report; re-reads the file if it was unavailable at open
    pub fn manifest_report(&self) -> Result<Report> {
        match &self.manifest {
            Some(manifest) => Ok(manifest_report(manifest)),
            None => read_property_list(paths::manifest_plist(&self.db_path))
                .map(|manifest| manifest_report(&manifest)),
        }
    }

    /// Status.plist report; re-reads the file if it was unavailable at open
    pub fn status_report(&self) -> Result<Report> {
        match &self.status {
            Some(status) => Ok(status_report(status)),
            None => read_property_list(paths::status_plist(&self.db_path))
                .map(|status| status_report(&status)),
        }
    }
}

fn load_optional(path: &Path) -> Option<PropertyNode> {
    match read_property_list(path) {
        Ok(tree) => Some(tree),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}
