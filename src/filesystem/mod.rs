// src/filesystem/mod.rs

//! Filesystem operations on a backup directory
//!
//! This module provides:
//! - The content locator mapping a file identifier to its sharded payload path
//! - Chunked payload copies and destination path validation

mod copier;
mod locator;

pub use copier::{
    copy_chunked, create_parent_dirs, safe_target_path, DEFAULT_CHUNK_SIZE, DEFAULT_DIR_MODE,
};
pub use locator::{resolve_payload_path, shard_prefix, PayloadLocator, SHARD_PREFIX_LEN};
