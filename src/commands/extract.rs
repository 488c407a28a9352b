// src/commands/extract.rs

//! Copy commands: single record and whole domain

use super::progress::ExtractProgress;
use anyhow::Result;
use manifestdb::{BackupSession, ExtractionState, LogProgress, ProgressTracker, ViewerConfig};
use std::path::Path;
use tracing::info;

/// Copy one record, by file identifier, into `dir`
pub fn cmd_copy(db_path: &Path, file_id: &str, dir: &Path, config: &ViewerConfig) -> Result<()> {
    let session = BackupSession::open(db_path, config)?;
    let target = session.copy_file_id(file_id, dir)?;
    println!("Copied {} to {}", file_id, target.display());
    Ok(())
}

/// Extract every regular file of `domain` into the empty directory `dir`
pub fn cmd_extract(
    db_path: &Path,
    domain: &str,
    dir: &Path,
    no_progress: bool,
    config: &ViewerConfig,
) -> Result<()> {
    let mut session = BackupSession::open(db_path, config)?;
    session.select_domain(domain)?;

    let plan = session.plan_extraction(dir)?;
    if plan.is_empty() {
        println!(
            "Nothing to extract: {} has no payload bytes ({} files, {} other records)",
            domain,
            plan.items().len(),
            plan.skipped()
        );
        return Ok(());
    }

    println!(
        "Extracting {} files ({} bytes) from {} to {}",
        plan.items().len(),
        plan.total_bytes(),
        domain,
        dir.display()
    );

    let total_bytes = plan.total_bytes();
    let handle = plan.spawn(config.extract_options())?;
    let tracker: Box<dyn ProgressTracker> = if no_progress {
        Box::new(LogProgress::new(domain, total_bytes))
    } else {
        Box::new(ExtractProgress::new(total_bytes, domain))
    };

    let report = handle.observe(tracker.as_ref(), config.progress_interval())?;
    info!("Extraction report: {}", report);

    println!("{}", report);
    if report.state != ExtractionState::Done {
        anyhow::bail!(
            "{} of {} files could not be extracted",
            report.files_failed(),
            report.files_attempted
        );
    }
    Ok(())
}
