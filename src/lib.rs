// src/lib.rs

//! ManifestDB: reader and extractor for iOS device backups
//!
//! A backup directory holds a SQLite catalog (`Manifest.db`) describing
//! every backed-up file, the payloads themselves sharded by file
//! identifier, and two property lists describing the backup as a whole.
//!
//! # Architecture
//!
//! - Catalog: the `Files` table, loaded once into memory, read-only
//! - Domains: records grouped by owning domain, offered via naked records
//! - Locator: `root/<fileID[0..2]>/<fileID>` path derivation
//! - Metadata: per-record keyed archives decoded into flat reports
//! - Extraction: scan, then copy on a background thread with progress
//!   events, partial-failure accounting and cancellation

pub mod backup_info;
pub mod config;
pub mod csv_export;
pub mod db;
pub mod domain;
mod error;
pub mod extract;
pub mod filesystem;
pub mod metadata;
pub mod progress;
pub mod property;
pub mod report;
pub mod session;

pub use config::ViewerConfig;
pub use db::models::{CatalogRecord, EntryKind};
pub use db::{open_catalog, Catalog};
pub use domain::{build_naked_domain_list, find_first_match, select_domain, DomainGroup};
pub use error::{Error, Result};
pub use extract::{
    copy_single_record, scan, ExtractOptions, ExtractionEvent, ExtractionHandle, ExtractionItem,
    ExtractionPlan, ExtractionProgress, ExtractionReport, ExtractionState,
};
pub use filesystem::{resolve_payload_path, PayloadLocator};
pub use metadata::{decode_metadata, file_info_report, TimestampZone};
pub use progress::{CallbackProgress, LogProgress, ProgressEvent, ProgressTracker, SilentProgress};
pub use property::{PropertyMap, PropertyNode};
pub use report::{Report, ReportLine};
pub use session::BackupSession;
