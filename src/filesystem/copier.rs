// src/filesystem/copier.rs

//! Streamed payload copies out of a backup
//!
//! Payloads are copied in fixed-size chunks. Each copy opens exactly one
//! source and one destination handle and closes both before returning.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Default chunk size for streamed copies
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default mode for directories created under a destination (owner/group only)
pub const DEFAULT_DIR_MODE: u32 = 0o750;

/// Validate and compute a target path within a destination root
///
/// Relative paths come straight from the catalog. `.` components are
/// dropped, leading slashes stripped, and any `..` component is rejected
/// so a crafted catalog cannot write outside the destination.
pub fn safe_target_path(root: &Path, relative_path: &str) -> Result<PathBuf> {
    let relative = relative_path.trim_start_matches('/');

    let mut normalized = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(c) => normalized.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                warn!("Path traversal attempt detected: {}", relative_path);
                return Err(Error::InvalidPath(format!(
                    "path traversal detected: {}",
                    relative_path
                )));
            }
            Component::Prefix(_) | Component::RootDir => {}
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(Error::InvalidPath(format!(
            "empty path after normalization: '{}'",
            relative_path
        )));
    }

    let target_path = root.join(&normalized);
    if !target_path.starts_with(root) {
        return Err(Error::InvalidPath(format!(
            "path escapes destination root: {}",
            relative_path
        )));
    }

    Ok(target_path)
}

/// Create every missing parent directory of `target` with `mode`
pub fn create_parent_dirs(target: &Path, mode: u32) -> Result<()> {
    let Some(parent) = target.parent() else {
        return Ok(());
    };
    if parent.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(parent)
        .map_err(|e| Error::payload_io(parent, e))?;
    debug!("Created directory: {}", parent.display());
    Ok(())
}

/// Copy `source` to `target` in chunks of `chunk_size` bytes
///
/// Returns the number of bytes written. The target is created or
/// truncated. Failures name whichever side of the copy failed.
pub fn copy_chunked(source: &Path, target: &Path, chunk_size: usize) -> Result<u64> {
    let mut reader = File::open(source).map_err(|e| Error::payload_io(source, e))?;
    let mut writer = File::create(target).map_err(|e| Error::payload_io(target, e))?;

    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut copied: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::payload_io(source, e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::payload_io(target, e))?;
        copied += n as u64;
    }
    writer.flush().map_err(|e| Error::payload_io(target, e))?;

    debug!(
        "Copied {} -> {} ({} bytes)",
        source.display(),
        target.display(),
        copied
    );
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_safe_target_path_normal() {
        let root = Path::new("/dest");
        assert_eq!(
            safe_target_path(root, "Library/Notes/a.txt").unwrap(),
            PathBuf::from("/dest/Library/Notes/a.txt")
        );
        assert_eq!(
            safe_target_path(root, "/Library/./b.txt").unwrap(),
            PathBuf::from("/dest/Library/b.txt")
        );
    }

    #[test]
    fn test_safe_target_path_rejects_traversal() {
        let root = Path::new("/dest");
        assert!(matches!(
            safe_target_path(root, "../etc/passwd"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            safe_target_path(root, "a/../../b"),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(safe_target_path(root, ""), Err(Error::InvalidPath(_))));
        assert!(matches!(safe_target_path(root, "./"), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_copy_chunked_small_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src.bin");
        let target = temp_dir.path().join("dst.bin");
        let content: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&source, &content).unwrap();

        let copied = copy_chunked(&source, &target, 7).unwrap();
        assert_eq!(copied, content.len() as u64);
        assert_eq!(fs::read(&target).unwrap(), content);
    }

    #[test]
    fn test_copy_chunked_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("empty");
        let target = temp_dir.path().join("copy");
        fs::write(&source, b"").unwrap();

        assert_eq!(copy_chunked(&source, &target, DEFAULT_CHUNK_SIZE).unwrap(), 0);
        assert!(target.exists());
    }

    #[test]
    fn test_copy_chunked_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("missing");
        let target = temp_dir.path().join("copy");

        let err = copy_chunked(&source, &target, DEFAULT_CHUNK_SIZE).unwrap_err();
        assert!(matches!(err, Error::PayloadIo { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_create_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a/b/c/file.txt");

        create_parent_dirs(&target, DEFAULT_DIR_MODE).unwrap();
        assert!(temp_dir.path().join("a/b/c").is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(temp_dir.path().join("a/b/c"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o007, 0);
        }
    }
}
