//! kubeforge core - scaffolding and wiring engine.
//!
//! This crate provides the domain and application layers for the kubeforge
//! operator scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          kubeforge-cli (CLI)            │
//! │   (PROJECT file, flags, boilerplate)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, WiringUpdater)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateRenderer, Producer)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   kubeforge-adapters (Infrastructure)   │
//! │ (LocalFilesystem, SimpleRenderer, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ResourceIdentity, TemplateContext,     │
//! │  WiringMarker, VersionPolicy)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kubeforge_core::prelude::*;
//!
//! let resource = ResourceIdentity::new("batch", "v1", "CronJob", "tutorial.io")?;
//! let ctx = TemplateContext::builder(resource.clone())
//!     .capability(Capability::Defaulting, true)
//!     .build()?;
//!
//! // producers, renderer and filesystem come from kubeforge-adapters
//! let report = ScaffoldService::new(renderer, filesystem, ".").execute(&producers, &ctx)?;
//! let wired = updater.update_wiring(Path::new("main.go"), &resource, WiringFlags::webhook())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FileArtifact, Outcome, ScaffoldReport, ScaffoldService, WiringReport, WiringUpdater,
        ports::{FileLock, FileProducer, Filesystem, ProducerInput, TemplateRenderer},
    };
    pub use crate::domain::{
        Capability, ConflictPolicy, ProducerKind, ProjectVersion, RelativePath, ResourceIdentity,
        TemplateBody, TemplateContext, VersionPolicy, WiringFlags, WiringTarget,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
