//! Application layer errors.
//!
//! These errors represent failures in orchestration and filesystem state, not
//! invalid input. Input errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::ScaffoldReport;
use crate::error::ErrorCategory;

/// Errors that occur during scaffolding and wiring.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target file exists and the conflict policy forbids touching it.
    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },

    /// Writing a file failed. The target is left as it was.
    #[error("Failed to write {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    /// Reading an existing file failed.
    #[error("Failed to read {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    /// The entry file to wire into does not exist.
    #[error("Entry file not found: {path}")]
    EntryFileMissing { path: PathBuf },

    /// A required anchor is missing from the entry file.
    #[error("Marker '{marker}' not found in {path}: expected a line '{anchor}'")]
    MarkerNotFound {
        marker: String,
        anchor: String,
        path: PathBuf,
    },

    /// The Go import alias for a resource is already taken by another package.
    #[error("Import alias '{alias}' in {path} already refers to {existing}, not \"{wanted}\"")]
    ImportAliasConflict {
        alias: String,
        existing: String,
        wanted: String,
        path: PathBuf,
    },

    /// At least one producer did not complete. Carries every outcome.
    #[error("{report}")]
    ScaffoldIncomplete { report: ScaffoldReport },

    /// The entry file lock could not be acquired.
    #[error("Failed to lock {path}: {reason}")]
    LockFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileExists { path } => vec![
                format!("{} was not modified", path.display()),
                "Re-run with --force to overwrite it".into(),
                "Or delete the file and run the command again".into(),
            ],
            Self::WriteError { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions and free disk space".into(),
            ],
            Self::ReadError { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the file is readable and valid UTF-8".into(),
            ],
            Self::EntryFileMissing { path } => vec![
                format!("Expected the project entry file at {}", path.display()),
                "Run this command from the project root or pass --project-dir".into(),
            ],
            Self::MarkerNotFound { anchor, path, .. } => vec![
                format!("Restore the line '{}' in {}", anchor, path.display()),
                "The entry file may have been edited by hand".into(),
            ],
            Self::ImportAliasConflict { alias, existing, .. } => vec![
                format!("'{alias}' is already imported as {existing}"),
                "Groups that differ only by '.' or '-' share an import alias".into(),
                "Rename one of the groups or wire the second package by hand".into(),
            ],
            Self::ScaffoldIncomplete { report } => {
                let mut hints: Vec<String> = report
                    .incomplete()
                    .map(|entry| format!("{}: {}", entry.path_display(), entry.outcome))
                    .collect();
                if report.conflicts().next().is_some() {
                    hints.push("Re-run with --force to overwrite existing files".into());
                }
                hints
            }
            Self::LockFailed { path, .. } => vec![
                format!("Another process may be updating {}", path.display()),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileExists { .. } | Self::ImportAliasConflict { .. } => ErrorCategory::Conflict,
            Self::EntryFileMissing { .. } | Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
            Self::ScaffoldIncomplete { report } => {
                if report.failures().next().is_none() {
                    ErrorCategory::Conflict
                } else {
                    ErrorCategory::Internal
                }
            }
            Self::WriteError { .. } | Self::ReadError { .. } | Self::LockFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
