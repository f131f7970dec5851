//! Infrastructure adapters for kubeforge.
//!
//! This crate implements the ports defined in `kubeforge_core::application::ports`
//! and ships the built-in templates. All disk I/O lives here.

pub mod builtin_templates;
pub mod filesystem;
pub mod producers;
pub mod renderer;

// Re-export commonly used adapters
pub use builtin_templates::template_for;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use producers::{BuiltinProducer, producer_for, producers_for};
pub use renderer::SimpleRenderer;
