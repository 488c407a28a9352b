// src/commands/mod.rs
//! Command handlers for the ManifestDB CLI

mod backup;
mod browse;
mod extract;
pub mod progress;

// Re-export all command handlers
pub use backup::{cmd_export_csv, cmd_manifest, cmd_status};
pub use browse::{cmd_domains, cmd_info, cmd_list};
pub use extract::{cmd_copy, cmd_extract};
