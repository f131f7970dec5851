//! Application layer for kubeforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, WiringUpdater)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! naming or layout rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ArtifactWriter, FileArtifact, Outcome, ProducerResult, ScaffoldReport, ScaffoldService,
    WiringReport, WiringUpdater, WriteOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FileLock, FileProducer, Filesystem, NoopLock, ProducerInput, TemplateRenderer};

pub use error::ApplicationError;
