// src/db/models/catalog_record.rs

//! CatalogRecord model - one row of the backup's `Files` table

use rusqlite::Row;
use rusqlite::types::Value;
use std::fmt;

/// Number of leading columns read positionally into typed fields
pub const CORE_COLUMNS: usize = 5;

/// Kind of entry described by the `flags` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    RegularFile,
    Directory,
    Symlink,
    /// Flag value outside the documented set
    Other(i64),
}

impl EntryKind {
    pub fn from_flags(flags: i64) -> Self {
        match flags {
            1 => Self::RegularFile,
            2 => Self::Directory,
            3 => Self::Symlink,
            other => Self::Other(other),
        }
    }

    /// Only regular files have a payload stored under the backup root
    pub fn has_payload(&self) -> bool {
        matches!(self, Self::RegularFile)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegularFile => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Symlink => write!(f, "symlink"),
            Self::Other(flags) => write!(f, "unknown({})", flags),
        }
    }
}

/// A single catalog entry
///
/// Columns are read by position: fileID, domain, relativePath, flags,
/// metadata blob. Any further columns are kept verbatim in `extra` so the
/// CSV export can reproduce the full row. A NULL leading column reads as an
/// empty value (flag 0) and is remembered so `column_values` yields NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub file_id: String,
    pub domain: String,
    /// Empty for domain placeholder records
    pub relative_path: String,
    pub flags: i64,
    pub metadata: Vec<u8>,
    pub extra: Vec<Value>,
    null_columns: [bool; CORE_COLUMNS],
}

impl CatalogRecord {
    /// Create a record with no extra columns
    pub fn new(
        file_id: impl Into<String>,
        domain: impl Into<String>,
        relative_path: impl Into<String>,
        flags: i64,
        metadata: Vec<u8>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            domain: domain.into(),
            relative_path: relative_path.into(),
            flags,
            metadata,
            extra: Vec::new(),
            null_columns: [false; CORE_COLUMNS],
        }
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::from_flags(self.flags)
    }

    pub fn is_regular_file(&self) -> bool {
        self.kind().has_payload()
    }

    /// True for records without a relative path (domain placeholders)
    pub fn is_naked(&self) -> bool {
        self.relative_path.is_empty()
    }

    /// Last component of the relative path, used as the single-copy file name
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// True if leading column `idx` was NULL in the catalog
    pub fn is_null_column(&self, idx: usize) -> bool {
        self.null_columns.get(idx).copied().unwrap_or(false)
    }

    /// All column values in catalog order, NULLs included
    pub fn column_values(&self) -> Vec<Value> {
        let core = [
            Value::Text(self.file_id.clone()),
            Value::Text(self.domain.clone()),
            Value::Text(self.relative_path.clone()),
            Value::Integer(self.flags),
            Value::Blob(self.metadata.clone()),
        ];

        let mut values = Vec::with_capacity(CORE_COLUMNS + self.extra.len());
        for (value, &null) in core.into_iter().zip(&self.null_columns) {
            values.push(if null { Value::Null } else { value });
        }
        values.extend(self.extra.iter().cloned());
        values
    }

    /// Convert a database row to a CatalogRecord
    ///
    /// NULL text and blob columns read as empty, a NULL flag as 0.
    pub(crate) fn from_row(row: &Row, column_count: usize) -> rusqlite::Result<Self> {
        let mut extra = Vec::new();
        for idx in CORE_COLUMNS..column_count {
            extra.push(row.get::<_, Value>(idx)?);
        }

        let file_id = row.get::<_, Option<String>>(0)?;
        let domain = row.get::<_, Option<String>>(1)?;
        let relative_path = row.get::<_, Option<String>>(2)?;
        let flags = row.get::<_, Option<i64>>(3)?;
        let metadata = row.get::<_, Option<Vec<u8>>>(4)?;

        Ok(Self {
            null_columns: [
                file_id.is_none(),
                domain.is_none(),
                relative_path.is_none(),
                flags.is_none(),
                metadata.is_none(),
            ],
            file_id: file_id.unwrap_or_default(),
            domain: domain.unwrap_or_default(),
            relative_path: relative_path.unwrap_or_default(),
            flags: flags.unwrap_or(0),
            metadata: metadata.unwrap_or_default(),
            extra,
        })
    }
}
