//! Conflict resolver and writer.
//!
//! Decides, per [`ConflictPolicy`], whether a rendered artifact may be written
//! and commits it through the filesystem port's atomic write.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{ConflictPolicy, RelativePath},
    error::ForgeResult,
};

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifact {
    pub path: RelativePath,
    pub content: String,
    pub policy: ConflictPolicy,
}

impl FileArtifact {
    /// Build an artifact, rejecting absolute paths and paths that escape the
    /// project root.
    pub fn new(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        policy: ConflictPolicy,
    ) -> ForgeResult<Self> {
        Ok(Self {
            path: RelativePath::try_new(path)?,
            content: content.into(),
            policy,
        })
    }
}

/// Result of a successful write decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Written,
    Skipped,
}

/// Writes artifacts below a project root.
pub struct ArtifactWriter<'a> {
    filesystem: &'a dyn Filesystem,
    root: &'a Path,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, root: &'a Path) -> Self {
        Self { filesystem, root }
    }

    /// Apply the artifact's conflict policy and write it.
    ///
    /// # Errors
    ///
    /// - `FileExists` when the policy forbids touching an existing file
    /// - `WriteError` / `ReadError` for I/O faults; the target is unchanged
    #[instrument(skip_all, fields(path = %artifact.path, policy = %artifact.policy))]
    pub fn write(&self, artifact: &FileArtifact) -> ForgeResult<WriteOutcome> {
        let target = artifact.path.under(self.root);

        match artifact.policy {
            ConflictPolicy::Overwrite => {}
            ConflictPolicy::Skip => {
                if self.filesystem.exists(&target) {
                    debug!("Target exists, skipping");
                    return Ok(WriteOutcome::Skipped);
                }
            }
            ConflictPolicy::Error => {
                if self.filesystem.exists(&target) {
                    return Err(ApplicationError::FileExists {
                        path: artifact.path.as_path().to_path_buf(),
                    }
                    .into());
                }
            }
            ConflictPolicy::ErrorIfExists => {
                if let Some(existing) = self.filesystem.read_to_string(&target)? {
                    if existing == artifact.content {
                        debug!("Target already holds identical content");
                        return Ok(WriteOutcome::Skipped);
                    }
                    return Err(ApplicationError::FileExists {
                        path: artifact.path.as_path().to_path_buf(),
                    }
                    .into());
                }
            }
        }

        self.filesystem.write_atomic(&target, &artifact.content)?;
        debug!(bytes = artifact.content.len(), "Artifact written");
        Ok(WriteOutcome::Written)
    }
}
