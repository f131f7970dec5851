//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kubeforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: reads, atomic writes, exclusive locks
//!   - `TemplateRenderer`: template composition and rendering
//!   - `FileProducer`: one generated file per producer kind
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{FileLock, FileProducer, Filesystem, NoopLock, ProducerInput, TemplateRenderer};

#[cfg(test)]
pub use output::MockFilesystem;
