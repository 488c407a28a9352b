// src/commands/browse.rs

//! Read-only browsing commands: domains, records, file details

use anyhow::{Context, Result};
use manifestdb::{BackupSession, ViewerConfig};
use std::path::Path;
use tracing::info;

/// List naked domains, or the first one matching `search`
pub fn cmd_domains(db_path: &Path, search: Option<&str>, config: &ViewerConfig) -> Result<()> {
    let session = BackupSession::open(db_path, config)?;

    if let Some(search) = search {
        match session.find_domain(search) {
            Some((idx, name)) => println!("{:>5}  {}", idx + 1, name),
            None => println!("No domain matches '{}'", search),
        }
        return Ok(());
    }

    let domains = session.naked_domains();
    if domains.is_empty() {
        println!("No domains found.");
        return Ok(());
    }

    println!("Domains ({}):", domains.len());
    for (idx, name) in domains.iter().enumerate() {
        println!("{:>5}  {}", idx + 1, name);
    }
    Ok(())
}

/// List every record of one domain in catalog order
pub fn cmd_list(db_path: &Path, domain: &str, config: &ViewerConfig) -> Result<()> {
    let mut session = BackupSession::open(db_path, config)?;
    let count = session.select_domain(domain)?;
    info!("Selected domain {} ({} records)", domain, count);

    println!("{} ({} records):", domain, count);
    for (idx, record) in session.displayed_records().iter().enumerate() {
        println!(
            "{:>5}  {}  {:<9}  {}",
            idx + 1,
            record.file_id,
            record.kind(),
            record.relative_path
        );
    }
    Ok(())
}

/// Show the decoded metadata of a displayed row (1-based)
pub fn cmd_info(db_path: &Path, domain: &str, row: usize, config: &ViewerConfig) -> Result<()> {
    let index = row
        .checked_sub(1)
        .context("Row numbers start at 1")?;

    let mut session = BackupSession::open(db_path, config)?;
    session.select_domain(domain)?;
    let report = session.file_info(index)?;
    print!("{}", report.to_text());
    Ok(())
}
