// src/backup_info.rs

//! Backup-level reports built from `Manifest.plist` and `Status.plist`
//!
//! Both documents are shown as flat key/value lists with keys in ascending
//! order. The manifest carries bulky or sensitive entries that are elided:
//! `Applications` and `BackupKeyBag` are replaced with a placeholder, and
//! `Lockdown` is shown field by field with its nested dictionaries dropped.

use crate::property::PropertyNode;
use crate::report::{Report, ReportLine};

pub const MANIFEST_TITLE: &str = "Manifest.plist";
pub const STATUS_TITLE: &str = "Status.plist";

/// Top-level manifest keys that are never shown verbatim
pub const MANIFEST_EXCLUDES: [&str; 3] = ["Applications", "BackupKeyBag", "Lockdown"];

const LOCKDOWN_KEY: &str = "Lockdown";
const SKIPPED: &str = "skipped";
const PARTIALLY_SKIPPED: &str = "partially skipped";

/// Build the Manifest.plist report with the elision rules applied
pub fn manifest_report(manifest: &PropertyNode) -> Report {
    let mut report = Report::titled(MANIFEST_TITLE);
    let Some(map) = manifest.as_map() else {
        report.push(ReportLine::standalone(manifest.to_string()));
        return report;
    };

    for (key, value) in map.sorted().iter() {
        if !MANIFEST_EXCLUDES.contains(&key) {
            report.push_pair(key, value.to_string());
            continue;
        }

        if key != LOCKDOWN_KEY {
            report.push_pair(key, SKIPPED);
            continue;
        }

        report.push_pair(key, PARTIALLY_SKIPPED);
        if let Some(lockdown) = value.as_map() {
            for (sub_key, sub_value) in lockdown.iter() {
                if sub_value.is_map() {
                    continue;
                }
                report.push_pair(sub_key, sub_value.to_string());
            }
        }
    }

    report
}

/// Build the Status.plist report (no elision)
pub fn status_report(status: &PropertyNode) -> Report {
    let mut report = Report::titled(STATUS_TITLE);
    match status.as_map() {
        Some(map) => {
            for (key, value) in map.sorted().iter() {
                report.push_pair(key, value.to_string());
            }
        }
        None => report.push(ReportLine::standalone(status.to_string())),
    }
    report
}
