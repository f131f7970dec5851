// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for kubeforge.
//!
//! Pure scaffolding logic: resource identity, template composition and
//! rendering, entry-file marker definitions, and the project version policy.
//! All I/O is handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: Identities and contexts are validated on construction
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod policy;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    context::{OptionValue, TemplateContext, TemplateContextBuilder, identity_variables},
    resource::{ResourceIdentity, pluralize},
    template::{GatedSection, TemplateBody, TemplateSource, render_template},
    wiring::{
        API_IMPORT, WiringMarker, contains_token, enclosing_block, find_anchor, import_binding,
        insert_before,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use policy::VersionPolicy;

pub use value_objects::{
    Capability, ConflictPolicy, ProducerClass, ProducerKind, ProjectVersion, WiringFlags,
    WiringTarget,
};
