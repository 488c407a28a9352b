// src/filesystem/locator.rs

//! Content locator for backup payload files
//!
//! A backup stores each regular file's payload under its file identifier,
//! sharded by the identifier's first two characters so no single directory
//! holds every payload:
//!
//! ```text
//! <backup_root>/<fileID[0..2]>/<fileID>
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Length of the sharding prefix
pub const SHARD_PREFIX_LEN: usize = 2;

/// Derive the physical payload path for a file identifier
///
/// Pure path arithmetic: no existence check is made here, a missing payload
/// only surfaces when it is read. Identifiers shorter than the prefix use
/// the whole identifier as the shard directory.
pub fn resolve_payload_path(backup_root: &Path, file_id: &str) -> PathBuf {
    backup_root.join(shard_prefix(file_id)).join(file_id)
}

/// First two characters of an identifier (char-boundary safe)
pub fn shard_prefix(file_id: &str) -> &str {
    match file_id.char_indices().nth(SHARD_PREFIX_LEN) {
        Some((idx, _)) => &file_id[..idx],
        None => file_id,
    }
}

/// Payload locator bound to one backup directory
#[derive(Debug, Clone)]
pub struct PayloadLocator {
    /// Backup directory holding the catalog and the shard directories
    backup_root: PathBuf,
}

impl PayloadLocator {
    pub fn new<P: AsRef<Path>>(backup_root: P) -> Self {
        Self {
            backup_root: backup_root.as_ref().to_path_buf(),
        }
    }

    /// Get the backup root directory
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Get the filesystem path for a given file identifier
    ///
    /// Example: `3d0d7e5fb2ce288813306e4d4636395e047a3d28` ->
    /// `<root>/3d/3d0d7e5fb2ce288813306e4d4636395e047a3d28`
    pub fn payload_path(&self, file_id: &str) -> PathBuf {
        resolve_payload_path(&self.backup_root, file_id)
    }

    /// Check if the payload for an identifier exists on disk
    pub fn exists(&self, file_id: &str) -> bool {
        self.payload_path(file_id).is_file()
    }

    /// Size in bytes of a payload, as reported by the filesystem
    pub fn payload_size(&self, file_id: &str) -> std::io::Result<u64> {
        let path = self.payload_path(file_id);
        let size = fs::metadata(&path)?.len();
        debug!("Payload {} is {} bytes", path.display(), size);
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_payload_path() {
        let root = Path::new("/backups/device");
        let file_id = "3d0d7e5fb2ce288813306e4d4636395e047a3d28";
        assert_eq!(
            resolve_payload_path(root, file_id),
            PathBuf::from("/backups/device/3d/3d0d7e5fb2ce288813306e4d4636395e047a3d28")
        );
    }

    #[test]
    fn test_resolve_payload_path_is_deterministic() {
        let root = Path::new("/r");
        for id in ["ab", "abcdef", "00ff00ff"] {
            let first = resolve_payload_path(root, id);
            let second = resolve_payload_path(root, id);
            assert_eq!(first, second);
            assert_eq!(first, root.join(&id[..2]).join(id));
        }
    }

    #[test]
    fn test_short_identifiers() {
        assert_eq!(shard_prefix("a"), "a");
        assert_eq!(shard_prefix(""), "");
        assert_eq!(
            resolve_payload_path(Path::new("/r"), "a"),
            PathBuf::from("/r/a/a")
        );
    }

    #[test]
    fn test_shard_prefix_multibyte() {
        assert_eq!(shard_prefix("äöü"), "äö");
    }

    #[test]
    fn test_locator_exists_and_size() {
        let temp_dir = TempDir::new().unwrap();
        let locator = PayloadLocator::new(temp_dir.path());

        let file_id = "ab0123456789";
        assert!(!locator.exists(file_id));
        assert!(locator.payload_size(file_id).is_err());

        let path = locator.payload_path(file_id);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"twelve bytes").unwrap();

        assert!(locator.exists(file_id));
        assert_eq!(locator.payload_size(file_id).unwrap(), 12);
        assert_eq!(locator.backup_root(), temp_dir.path());
    }
}
