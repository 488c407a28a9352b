// src/commands/progress.rs
//! Progress display for extraction
//!
//! Wraps an indicatif byte bar behind the library's `ProgressTracker`
//! trait so the extraction handle can drive it directly.

use indicatif::{ProgressBar, ProgressStyle};
use manifestdb::ProgressTracker;

/// Terminal progress bar counting copied bytes
pub struct ExtractProgress {
    bar: ProgressBar,
}

impl ExtractProgress {
    /// Create a byte bar for `total_bytes`
    pub fn new(total_bytes: u64, domain: &str) -> Self {
        let bar = ProgressBar::new(total_bytes);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.green/dim}] {bytes}/{total_bytes} ({eta})")
                .expect("Invalid progress bar template")
                .progress_chars("##-"),
        );
        bar.set_message(domain.to_string());
        Self { bar }
    }
}

impl ProgressTracker for ExtractProgress {
    fn set_message(&self, message: &str) {
        self.bar.println(format!("  {}", message));
    }

    fn set_position(&self, position: u64) {
        self.bar.set_position(position);
    }

    fn set_length(&self, length: u64) {
        self.bar.set_length(length);
    }

    fn position(&self) -> u64 {
        self.bar.position()
    }

    fn length(&self) -> u64 {
        self.bar.length().unwrap_or(0)
    }

    fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    fn finish_with_error(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }

    fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}
