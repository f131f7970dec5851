//! Errors surfaced by the `kubeforge` binary.
//!
//! Core errors are wrapped unchanged; their category decides the exit code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use kubeforge_core::error::ForgeError;

use kubeforge_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap cannot express.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `create webhook` without a webhook type.
    #[error("No webhook type requested")]
    NoWebhookType,

    /// The project root has no `PROJECT` file.
    #[error("No PROJECT file found at {path}")]
    ProjectFileMissing { path: PathBuf },

    /// The `PROJECT` file exists but cannot be used.
    #[error("Invalid PROJECT file {path}: {reason}")]
    InvalidProjectFile { path: PathBuf, reason: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `kubeforge-core`.
    #[error("{0}")]
    Core(#[from] ForgeError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::NoWebhookType => vec![
                "Pass --defaulting, --programmatic-validation, or both".into(),
                "Example: kubeforge create webhook --group batch --version v1 --kind CronJob --defaulting"
                    .into(),
            ],

            Self::ProjectFileMissing { path } => vec![
                "Run kubeforge from the project root or pass --project-dir".into(),
                format!("Expected a PROJECT file at {}", path.display()),
            ],

            Self::InvalidProjectFile { .. } => vec![
                "The PROJECT file needs 'version', 'domain' and 'repo' keys".into(),
                "Supported versions are \"1\" and \"2\"".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'kubeforge init-config' to create a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Category used for the exit code and log level.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::NoWebhookType => ErrorCategory::UserError,
            Self::ProjectFileMissing { .. } => ErrorCategory::NotFound,
            Self::InvalidProjectFile { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Conflict => ErrorCategory::Conflict,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Conflict      |  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Conflict => 5,
        }
    }

    /// Render the message, the cause chain (when `verbose`) and suggestions
    /// for stderr. `color` adds ANSI styling.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_string() }
        };
        let mut out = String::new();

        out.push_str(&format!(
            "\n{} {}\n",
            paint("error:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.bold().to_string()),
        ));

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!(
                    "  {} {}\n",
                    paint("caused by:", |t| t.dimmed().to_string()),
                    err
                ));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("help:", |t| t.yellow().bold().to_string())
            ));
            for hint in &suggestions {
                out.push_str(&format!("  - {hint}\n"));
            }
        }

        if !verbose && self.source().is_some() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Re-run with -v to see the underlying cause.", |t| {
                    t.dimmed().to_string()
                })
            ));
        }

        out
    }

    /// Emit the error as a tracing event before it is printed.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Internal | ErrorCategory::Configuration => {
                tracing::error!(category = ?self.category(), "{self}");
            }
            _ => tracing::warn!(category = ?self.category(), "{self}"),
        }
        if let Some(cause) = self.source() {
            tracing::debug!("cause: {cause}");
        }
    }
}

/// How the CLI classifies a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Files already exist and the policy forbids replacing them.
    Conflict,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
