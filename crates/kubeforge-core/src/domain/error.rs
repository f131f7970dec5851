// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports carry them around)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid {field} '{value}': {reason}")]
    InvalidIdentity {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathOutsideProject { path: String },

    // ========================================================================
    // Template Errors (engine bugs or malformed payloads)
    // ========================================================================
    #[error("template '{template}' failed to render: {reason}")]
    TemplateError { template: String, reason: String },

    // ========================================================================
    // Project Version Errors
    // ========================================================================
    #[error("unsupported project version '{version}'")]
    UnsupportedProjectVersion { version: String },

    #[error("{target} wiring is not supported for project version {version}")]
    UnsupportedWiring { version: String, target: String },
}

impl DomainError {
    /// Shorthand for an identity validation failure.
    pub fn invalid(field: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentity {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentity { field, .. } => match *field {
                "kind" => vec![
                    "Kinds are CamelCase identifiers starting with an uppercase letter".into(),
                    "Examples: CronJob, FirstMate, Kraken".into(),
                ],
                "version" => vec![
                    "Versions look like v1, v1beta1 or v2alpha3".into(),
                ],
                "group" | "domain" => vec![
                    "Use lowercase letters, digits, '-' and '.' only".into(),
                    "Each dot-separated label must be at most 63 characters".into(),
                ],
                _ => vec![format!("Check the value passed for --{field}")],
            },
            Self::TemplateError { template, .. } => vec![
                format!("Template '{}' is malformed or references an unknown field", template),
                "This is a bug in kubeforge, please report it".into(),
            ],
            Self::UnsupportedProjectVersion { version } => vec![
                format!("PROJECT declares version '{}'", version),
                "Supported project versions: 1, 2".into(),
            ],
            Self::UnsupportedWiring { .. } => vec![
                "Upgrade the project layout to version 2 to scaffold webhooks".into(),
            ],
            Self::PathOutsideProject { .. } | Self::AbsolutePathNotAllowed { .. } => vec![
                "Generated files must live inside the project directory".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentity { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathOutsideProject { .. } => ErrorCategory::Validation,
            Self::UnsupportedProjectVersion { .. } | Self::UnsupportedWiring { .. } => {
                ErrorCategory::Compatibility
            }
            Self::TemplateError { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    Internal,
}
