//! Unified error handling for kubeforge core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for kubeforge core operations.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// Errors from the domain layer (invalid input, unsupported layouts).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem state, conflicts).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ForgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Run 'kubeforge init-config' to write a default config file".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in kubeforge".into(),
                "Please report this issue at: https://github.com/cosecruz/kubeforge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Shorthand for an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn domain_errors_keep_their_message() {
        let err: ForgeError = DomainError::invalid("kind", "", "must not be empty").into();
        assert_eq!(err.to_string(), "invalid kind '': must not be empty");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn file_exists_is_a_conflict() {
        let err: ForgeError = ApplicationError::FileExists {
            path: PathBuf::from("batch/v1/cronjob_webhook.go"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn unsupported_version_is_compatibility() {
        let err: ForgeError = DomainError::UnsupportedProjectVersion {
            version: "9".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }
}
