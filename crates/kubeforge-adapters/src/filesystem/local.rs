//! Local filesystem adapter using std::fs.
//!
//! Writes go to a temporary file in the target directory, are synced, then
//! renamed over the target, so readers see the old content or the new content
//! and never a truncated file. A replaced file keeps its permissions; new files
//! get `0644` (minus the umask) on unix rather than the temp file's `0600`. Locks are OS-level (`fs4`) exclusive locks on a
//! sibling `<file>.lock`, released on drop.
//!
//! The lock file is left in place after release. Removing it would let a
//! waiter hold a lock on an unlinked inode while a newcomer locks a fresh one.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use kubeforge_core::{
    application::{ApplicationError, ports::FileLock, ports::Filesystem},
    error::{ForgeError, ForgeResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> ForgeResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApplicationError::ReadError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_atomic(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| write_error(path, e, "create directory"))?;

        let existing = std::fs::metadata(path)
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.permissions());

        let mut temp = temp_file_in(parent).map_err(|e| write_error(path, e, "create temp file"))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| write_error(path, e, "write temp file"))?;
        if let Some(permissions) = existing {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|e| write_error(path, e, "copy permissions"))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| write_error(path, e, "sync temp file"))?;

        // On failure the temp file is dropped and removed; the target is untouched.
        temp.persist(path)
            .map_err(|e| write_error(path, e.error, "rename temp file"))?;

        debug!(path = %path.display(), bytes = content.len(), "File written atomically");
        Ok(())
    }

    fn lock_exclusive(&self, path: &Path) -> ForgeResult<Box<dyn FileLock>> {
        let lock_path = lock_path_for(path);
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| lock_error(&lock_path, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| lock_error(&lock_path, e))?;

        debug!(lock = %lock_path.display(), "Waiting for file lock");
        FileExt::lock_exclusive(&file).map_err(|e| lock_error(&lock_path, e))?;
        debug!(lock = %lock_path.display(), "File lock acquired");

        Ok(Box::new(LocalLock {
            _file: file,
            path: lock_path,
        }))
    }
}

/// Exclusive lock held on `<file>.lock`. Closing the handle releases it.
#[derive(Debug)]
struct LocalLock {
    _file: File,
    path: PathBuf,
}

impl FileLock for LocalLock {}

impl Drop for LocalLock {
    fn drop(&mut self) {
        debug!(lock = %self.path.display(), "File lock released");
    }
}

#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o644))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().tempfile_in(dir)
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

fn write_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::WriteError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn lock_error(path: &Path, e: io::Error) -> ForgeError {
    ApplicationError::LockFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_creates_parents_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("batch/v1/cronjob_webhook.go");

        let fs = LocalFilesystem::new();
        fs.write_atomic(&target, "package v1\n").unwrap();

        assert!(fs.exists(&target));
        assert_eq!(
            fs.read_to_string(&target).unwrap().as_deref(),
            Some("package v1\n")
        );
    }

    #[test]
    fn missing_files_read_as_none() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        assert_eq!(fs.read_to_string(&dir.path().join("nope.go")).unwrap(), None);
    }

    #[test]
    fn overwrite_replaces_whole_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("main.go");
        let fs = LocalFilesystem::new();

        fs.write_atomic(&target, "a much longer original body\n").unwrap();
        fs.write_atomic(&target, "short\n").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "short\n");
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("main.go");
        std::fs::write(&target, "package main\n").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o640)).unwrap();

        LocalFilesystem::new()
            .write_atomic(&target, "package main\n\n// wired\n")
            .unwrap();
        assert_eq!(mode(&target), 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_not_owner_only() {
        let dir = TempDir::new().unwrap();
        // what the umask leaves of a plainly created file
        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, "").unwrap();
        let expected = mode(&plain) & 0o644;

        let target = dir.path().join("batch/v1/cronjob_types.go");
        LocalFilesystem::new()
            .write_atomic(&target, "package v1\n")
            .unwrap();
        assert_eq!(mode(&target), expected);
    }

    #[test]
    fn failed_rename_leaves_no_partial_files() {
        let dir = TempDir::new().unwrap();
        // a directory in the way makes the final rename fail
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "kept").unwrap();

        let fs = LocalFilesystem::new();
        let err = fs.write_atomic(&target, "new content").unwrap_err();
        assert!(err.to_string().contains("occupied"));

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("occupied")]);
        assert_eq!(
            std::fs::read_to_string(target.join("keep.txt")).unwrap(),
            "kept"
        );
    }

    #[test]
    fn lock_can_be_reacquired_after_release() {
        let dir = TempDir::new().unwrap();
        let entry = dir.path().join("main.go");
        std::fs::write(&entry, "package main\n").unwrap();

        let fs = LocalFilesystem::new();
        let lock = fs.lock_exclusive(&entry).unwrap();
        assert!(dir.path().join("main.go.lock").exists());
        drop(lock);

        let _again = fs.lock_exclusive(&entry).unwrap();
        assert_eq!(
            std::fs::read_to_string(&entry).unwrap(),
            "package main\n"
        );
    }

    #[test]
    fn lock_serializes_threads() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let dir = TempDir::new().unwrap();
        let entry = Arc::new(dir.path().join("main.go"));
        let order = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let entry = Arc::clone(&entry);
                let order = Arc::clone(&order);
                thread::spawn(move || {
                    let fs = LocalFilesystem::new();
                    let _lock = fs.lock_exclusive(&entry).unwrap();
                    order.lock().unwrap().push((i, "start"));
                    thread::sleep(std::time::Duration::from_millis(10));
                    order.lock().unwrap().push((i, "end"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let order = order.lock().unwrap();
        for pair in order.chunks(2) {
            assert_eq!(pair[0].0, pair[1].0, "critical sections interleaved");
        }
    }
}
