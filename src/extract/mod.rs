// src/extract/mod.rs

//! Extraction pipeline: copying selected catalog records out of a backup
//!
//! Bulk extraction moves through these states:
//!
//! ```text
//! Idle -> Scanning -> Copying -> Done | PartialFailure | Cancelled
//!                 \-> Done (zero bytes to copy)
//! ```
//!
//! Scanning runs on the caller's thread: it checks the preconditions
//! (non-empty selection, empty destination), keeps only regular files and
//! sums their payload sizes. A zero total ends the run without copying. Copying runs on its own thread and publishes
//! `ExtractionEvent`s; a failure on one file is counted and the next file
//! proceeds. Nothing is retried.

mod pipeline;
mod plan;
mod single;

pub use pipeline::ExtractionHandle;
pub use plan::{scan, ExtractionPlan};
pub use single::{copy_record_into, copy_single_record};

use crate::filesystem::{DEFAULT_CHUNK_SIZE, DEFAULT_DIR_MODE};
use std::fmt;
use std::path::PathBuf;

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    /// Nothing requested yet
    Idle,
    /// Checking preconditions and sizing payloads
    Scanning,
    /// Copying payloads to the destination
    Copying,
    /// Every attempted file copied
    Done,
    /// At least one file failed
    PartialFailure,
    /// Stopped on request before the item list was exhausted
    Cancelled,
}

impl ExtractionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::PartialFailure | Self::Cancelled)
    }
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Scanning => write!(f, "scanning"),
            Self::Copying => write!(f, "copying"),
            Self::Done => write!(f, "done"),
            Self::PartialFailure => write!(f, "partial failure"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One regular file scheduled for copying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionItem {
    pub file_id: String,
    pub relative_path: String,
    pub flags: i64,
    /// Payload location under the backup root
    pub source: PathBuf,
    /// Size at scan time; 0 if the payload could not be stat'ed
    pub size_bytes: u64,
}

/// Tunables for copying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub chunk_size: usize,
    /// Mode for created directories (Unix only)
    pub dir_mode: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

/// Cumulative progress after a file finished (successfully or not)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionProgress {
    /// Zero-based index of the file just processed
    pub current_index: usize,
    pub files_done: usize,
    pub files_total: usize,
    /// Scanned size of every processed file, failed ones included
    pub bytes_done: u64,
    pub bytes_total: u64,
}

/// Events published while copying
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionEvent {
    Progress(ExtractionProgress),
    FileFailed {
        index: usize,
        relative_path: String,
        reason: String,
    },
    Finished(ExtractionReport),
}

/// Terminal summary of an extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub state: ExtractionState,
    pub files_attempted: usize,
    pub files_copied: usize,
    /// Bytes actually written
    pub bytes_copied: u64,
    /// Scanned total of all items
    pub bytes_total: u64,
    pub destination: PathBuf,
}

impl ExtractionReport {
    /// Report for a run that had nothing to copy
    pub fn empty(destination: PathBuf) -> Self {
        Self {
            state: ExtractionState::Done,
            files_attempted: 0,
            files_copied: 0,
            bytes_copied: 0,
            bytes_total: 0,
            destination,
        }
    }

    pub fn files_failed(&self) -> usize {
        self.files_attempted - self.files_copied
    }
}

impl fmt::Display for ExtractionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} files extracted to {} ({} bytes, {})",
            self.files_copied,
            self.files_attempted,
            self.destination.display(),
            self.bytes_copied,
            self.state
        )
    }
}
