//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! high-level use cases: "scaffold files for a resource" and "wire a
//! resource into the entry file".

pub mod scaffold_service;
pub mod wiring_service;
pub mod writer;

pub use scaffold_service::{Outcome, ProducerResult, ScaffoldReport, ScaffoldService};
pub use wiring_service::{WiringReport, WiringUpdater};
pub use writer::{ArtifactWriter, FileArtifact, WriteOutcome};
