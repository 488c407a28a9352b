// src/commands/backup.rs

//! Backup-level commands: CSV export and property-list reports

use anyhow::Result;
use manifestdb::{BackupSession, ViewerConfig};
use std::path::Path;

/// Export the full catalog as CSV
pub fn cmd_export_csv(db_path: &Path, output: &Path, config: &ViewerConfig) -> Result<()> {
    let session = BackupSession::open(db_path, config)?;
    let path = session.export_csv(output)?;
    println!(
        "Exported {} records to {}",
        session.catalog().len(),
        path.display()
    );
    Ok(())
}

/// Show Manifest.plist with its bulky entries elided
pub fn cmd_manifest(db_path: &Path, config: &ViewerConfig) -> Result<()> {
    let session = BackupSession::open(db_path, config)?;
    print!("{}", session.manifest_report()?);
    Ok(())
}

/// Show Status.plist
pub fn cmd_status(db_path: &Path, config: &ViewerConfig) -> Result<()> {
    let session = BackupSession::open(db_path, config)?;
    print!("{}", session.status_report()?);
    Ok(())
}
