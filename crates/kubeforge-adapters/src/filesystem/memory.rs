//! In-memory filesystem adapter for testing.
//!
//! Writes replace whole entries under one write lock, which mirrors the
//! all-or-nothing contract of `LocalFilesystem`. Write failures can be
//! injected per path to exercise error handling.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use kubeforge_core::{
    application::{
        ApplicationError,
        ports::{FileLock, Filesystem, NoopLock},
    },
    error::ForgeResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    failing: BTreeSet<PathBuf>,
    writes: usize,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (testing helper). Bypasses fault injection.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.write_guard().files.insert(path.into(), content.into());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read_guard().files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_guard().files.keys().cloned().collect()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.read_guard().writes
    }

    /// Make every later write to `path` fail as if the disk were full.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.write_guard().failing.insert(path.into());
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.write_guard();
        inner.files.clear();
        inner.directories.clear();
        inner.failing.clear();
        inner.writes = 0;
    }

    // The maps stay consistent even if a holder panicked.
    fn read_guard(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> ForgeResult<Option<String>> {
        Ok(self.read_guard().files.get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read_guard();
        inner.files.contains_key(path)
            || inner.directories.contains(path)
            || inner.files.keys().any(|file| file.starts_with(path))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut inner = self.write_guard();

        if inner.failing.contains(path) {
            return Err(ApplicationError::WriteError {
                path: path.to_path_buf(),
                reason: "Failed to write temp file: No space left on device".into(),
            }
            .into());
        }

        let mut current = PathBuf::new();
        if let Some(parent) = path.parent() {
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        inner.writes += 1;
        Ok(())
    }

    /// No cross-process locking; the wiring updater's mutex covers tests.
    fn lock_exclusive(&self, _path: &Path) -> ForgeResult<Box<dyn FileLock>> {
        Ok(Box::new(NoopLock))
    }
}
