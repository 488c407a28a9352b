// src/metadata.rs

//! Metadata decoder for per-file catalog blobs
//!
//! Each catalog record carries a property list describing the file (size,
//! mode, ownership, timestamps, extended attributes). The blob is a keyed
//! archive: the interesting values live in the `$objects` array, a flattened
//! object graph whose entries are either bare strings (class and attribute
//! names) or dictionaries of attributes.

use crate::db::models::CatalogRecord;
use crate::error::{Error, Result};
use crate::property::{decode_property_tree, PropertyNode};
use crate::report::{Report, ReportLine};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level key holding the flattened object graph
pub const OBJECTS_KEY: &str = "$objects";

/// Attribute keys holding epoch seconds
pub const TIMESTAMP_KEYS: [&str; 3] = ["Birth", "LastModified", "LastStatusChange"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone used to render timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    /// Host local time
    #[default]
    Local,
    Utc,
}

impl TimestampZone {
    /// Render epoch seconds, or `None` if out of range
    pub fn format_epoch(&self, seconds: f64) -> Option<String> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
        let utc = DateTime::<Utc>::from_timestamp(whole as i64, nanos)?;

        Some(match self {
            Self::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
            Self::Local => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        })
    }
}

/// Decode a metadata blob, rendering timestamps in local time
pub fn decode_metadata(blob: &[u8]) -> Result<Report> {
    decode_metadata_with(blob, TimestampZone::Local)
}

/// Decode a metadata blob into a flat report
///
/// Top-level keys render as `(key, value)`, except `$objects`, which is
/// expanded entry by entry.
pub fn decode_metadata_with(blob: &[u8], zone: TimestampZone) -> Result<Report> {
    let tree = decode_property_tree(blob).map_err(|e| Error::MetadataDecode(e.to_string()))?;
    let Some(root) = tree.as_map() else {
        return Err(Error::MetadataDecode(
            "metadata root is not a dictionary".to_string(),
        ));
    };

    let mut report = Report::new();
    for (key, value) in root.iter() {
        if key == OBJECTS_KEY {
            expand_objects(value, zone, &mut report);
        } else {
            report.push_pair(key, value.to_string());
        }
    }

    debug!("Decoded metadata blob into {} lines", report.lines.len());
    Ok(report)
}

/// Detail report for one record, titled with the file's base name
pub fn file_info_report(record: &CatalogRecord, zone: TimestampZone) -> Result<Report> {
    let decoded = decode_metadata_with(&record.metadata, zone)?;
    let mut report = Report::titled(record.file_name());
    report.lines = decoded.lines;
    Ok(report)
}

fn expand_objects(objects: &PropertyNode, zone: TimestampZone, report: &mut Report) {
    let Some(entries) = objects.as_array() else {
        report.push_pair(OBJECTS_KEY, objects.to_string());
        return;
    };

    for entry in entries {
        match entry {
            PropertyNode::String(s) => report.push(ReportLine::standalone(s.clone())),
            PropertyNode::Map(attributes) => {
                for (name, value) in attributes.iter() {
                    report.push_pair(name, render_attribute(name, value, zone));
                }
            }
            other => report.push(ReportLine::standalone(other.to_string())),
        }
    }
}

fn render_attribute(name: &str, value: &PropertyNode, zone: TimestampZone) -> String {
    if TIMESTAMP_KEYS.contains(&name) {
        if let Some(rendered) = value.as_f64().and_then(|secs| zone.format_epoch(secs)) {
            return rendered;
        }
    }
    value.to_string()
}
