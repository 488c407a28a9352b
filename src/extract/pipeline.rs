// src/extract/pipeline.rs

//! Copying phase: the item loop and its background handle

use super::plan::ExtractionPlan;
use super::{
    ExtractOptions, ExtractionEvent, ExtractionItem, ExtractionProgress, ExtractionReport,
    ExtractionState,
};
use crate::error::{Error, Result};
use crate::filesystem::{copy_chunked, create_parent_dirs, safe_target_path};
use crate::progress::ProgressTracker;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

impl ExtractionPlan {
    /// Copy every item on the current thread
    ///
    /// `on_event` receives cumulative progress after each file, every
    /// per-file failure, and the final report. `cancel` is checked before
    /// each file; a file already being copied is finished first.
    pub fn run<F>(self, options: &ExtractOptions, cancel: &AtomicBool, mut on_event: F) -> ExtractionReport
    where
        F: FnMut(ExtractionEvent),
    {
        if self.is_empty() {
            info!("Nothing to extract (no payload bytes in {} files)", self.items.len());
            let report = self.empty_report();
            on_event(ExtractionEvent::Finished(report.clone()));
            return report;
        }

        let files_total = self.items.len();
        info!(
            "Extracting {} files ({} bytes) to {}",
            files_total,
            self.total_bytes,
            self.destination.display()
        );

        let mut files_attempted = 0;
        let mut files_copied = 0;
        let mut bytes_copied: u64 = 0;
        let mut bytes_done: u64 = 0;
        let mut cancelled = false;

        for (index, item) in self.items.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                info!("Extraction cancelled after {} of {} files", files_attempted, files_total);
                cancelled = true;
                break;
            }

            files_attempted += 1;
            match copy_item(&self.destination, item, options) {
                Ok(written) => {
                    files_copied += 1;
                    bytes_copied += written;
                }
                Err(e) => {
                    warn!("Failed to extract {}: {}", item.relative_path, e);
                    on_event(ExtractionEvent::FileFailed {
                        index,
                        relative_path: item.relative_path.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            bytes_done += item.size_bytes;
            on_event(ExtractionEvent::Progress(ExtractionProgress {
                current_index: index,
                files_done: files_attempted,
                files_total,
                bytes_done,
                bytes_total: self.total_bytes,
            }));
        }

        let state = if cancelled {
            ExtractionState::Cancelled
        } else if files_copied == files_attempted {
            ExtractionState::Done
        } else {
            ExtractionState::PartialFailure
        };

        let report = ExtractionReport {
            state,
            files_attempted,
            files_copied,
            bytes_copied,
            bytes_total: self.total_bytes,
            destination: self.destination,
        };
        info!("Extraction finished: {}", report);
        on_event(ExtractionEvent::Finished(report.clone()));
        report
    }

    /// Copy on a background thread and return a handle to observe it
    pub fn spawn(self, options: ExtractOptions) -> Result<ExtractionHandle> {
        let (tx, rx) = flume::unbounded();
        let cancel = Arc::new(AtomicBool::new(false));
        let thread_cancel = Arc::clone(&cancel);
        let bytes_total = self.total_bytes;
        let files_total = self.items.len();

        let thread = thread::Builder::new()
            .name("extract".to_string())
            .spawn(move || {
                self.run(&options, &thread_cancel, |event| {
                    // The observer may have gone away; copying continues regardless
                    let _ = tx.send(event);
                })
            })?;

        Ok(ExtractionHandle {
            events: rx,
            cancel,
            thread: Some(thread),
            bytes_total,
            files_total,
        })
    }
}

fn copy_item(destination: &Path, item: &ExtractionItem, options: &ExtractOptions) -> Result<u64> {
    let target = safe_target_path(destination, &item.relative_path)?;
    create_parent_dirs(&target, options.dir_mode)?;
    let written = copy_chunked(&item.source, &target, options.chunk_size)?;
    debug!("Extracted {} ({} bytes)", item.relative_path, written);
    Ok(written)
}

/// Handle to an extraction running on its own thread
///
/// Dropping the handle does not stop the copy; call `cancel` for that.
#[derive(Debug)]
pub struct ExtractionHandle {
    events: flume::Receiver<ExtractionEvent>,
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<ExtractionReport>>,
    bytes_total: u64,
    files_total: usize,
}

impl ExtractionHandle {
    /// Request cancellation; takes effect before the next file
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_total
    }

    pub fn files_total(&self) -> usize {
        self.files_total
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ExtractionEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Block until the copy completes and return its report
    pub fn wait(mut self) -> Result<ExtractionReport> {
        let thread = self
            .thread
            .take()
            .ok_or_else(|| Error::Io(std::io::Error::other("extraction already joined")))?;
        thread
            .join()
            .map_err(|_| Error::Io(std::io::Error::other("extraction thread panicked")))
    }

    /// Feed events into a tracker, polling every `interval`, until done
    pub fn observe(self, tracker: &dyn ProgressTracker, interval: Duration) -> Result<ExtractionReport> {
        tracker.set_length(self.bytes_total);

        loop {
            match self.events.recv_timeout(interval) {
                Ok(event) => {
                    let mut finished = apply_event(tracker, &event);
                    for event in self.events.try_iter() {
                        finished |= apply_event(tracker, &event);
                    }
                    if finished {
                        break;
                    }
                }
                Err(flume::RecvTimeoutError::Timeout) => {}
                Err(flume::RecvTimeoutError::Disconnected) => break,
            }
        }

        self.wait()
    }
}

/// Apply one event to a tracker; returns true for the final event
fn apply_event(tracker: &dyn ProgressTracker, event: &ExtractionEvent) -> bool {
    match event {
        ExtractionEvent::Progress(progress) => {
            tracker.set_position(progress.bytes_done);
            false
        }
        ExtractionEvent::FileFailed { relative_path, reason, .. } => {
            tracker.set_message(&format!("failed: {} ({})", relative_path, reason));
            false
        }
        ExtractionEvent::Finished(report) => {
            match report.state {
                ExtractionState::Done => tracker.finish_with_message(&report.to_string()),
                _ => tracker.finish_with_error(&report.to_string()),
            }
            true
        }
    }
}
