// src/cli.rs
//! CLI definitions for the ManifestDB backup reader
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "manifestdb")]
#[command(author = "ManifestDB Project")]
#[command(version)]
#[command(about = "Browse and extract files from iOS device backups", long_about = None)]
pub struct Cli {
    /// Configuration file (default: $MANIFESTDB_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log progress and decisions at info level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the domains of a backup
    Domains {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,

        /// Show only the first domain containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List every record of a domain
    List {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,

        /// Domain name, exactly as listed by `domains`
        domain: String,
    },

    /// Show the decoded metadata of one record
    Info {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,

        /// Domain name
        domain: String,

        /// Row number within the domain, as shown by `list` (starting at 1)
        row: usize,
    },

    /// Copy one file out of the backup into a folder
    Copy {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,

        /// File identifier of the record
        file_id: String,

        /// Folder to copy into (the file keeps its base name)
        dir: PathBuf,
    },

    /// Extract every file of a domain into an empty directory
    Extract {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,

        /// Domain name
        domain: String,

        /// Destination directory (must exist and be empty)
        dir: PathBuf,

        /// Log progress instead of drawing a progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Export the whole catalog as CSV
    ExportCsv {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,

        /// Output file, or a directory to write Manifest.csv into
        output: PathBuf,
    },

    /// Show Manifest.plist (applications and key bag elided)
    Manifest {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,
    },

    /// Show Status.plist
    Status {
        /// Path to Manifest.db or the backup directory
        db_path: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}
