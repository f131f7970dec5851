//! Domain value objects: ConflictPolicy, ProjectVersion, Capability,
//! WiringTarget, WiringFlags, ProducerKind.
//!
//! These are pure value types. `Copy`, equality-by-value, no identity.
//! Version-specific behaviour lives in `policy.rs`; this file only defines
//! the types, their string representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ConflictPolicy ────────────────────────────────────────────────────────────

/// What happens when a generated file's target path already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Leave the existing file alone and report it as skipped.
    Skip,
    /// Replace the existing content unconditionally.
    Overwrite,
    /// Refuse to touch an existing file.
    Error,
    /// Refuse to touch an existing file unless it already holds exactly the
    /// rendered content, in which case it is reported as skipped.
    ErrorIfExists,
}

impl ConflictPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Overwrite => "overwrite",
            Self::Error => "error",
            Self::ErrorIfExists => "error-if-exists",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProjectVersion ────────────────────────────────────────────────────────────

/// Layout version persisted in the PROJECT file when the project was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectVersion {
    V1,
    V2,
}

impl ProjectVersion {
    /// The tag as written in the PROJECT file.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2 => "2",
        }
    }
}

impl fmt::Display for ProjectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('"') {
            "1" => Ok(Self::V1),
            "2" => Ok(Self::V2),
            other => Err(DomainError::UnsupportedProjectVersion {
                version: other.to_string(),
            }),
        }
    }
}

// ── Capability ────────────────────────────────────────────────────────────────

/// Optional behaviour a producer may declare and a caller may request.
///
/// The declaration order here is the order gated template sections are
/// appended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Defaulting,
    Validation,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Defaulting, Capability::Validation];

    /// Option key used in the template context.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Defaulting => "defaulting",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── WiringTarget / WiringFlags ────────────────────────────────────────────────

/// An independent piece of entry-file wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WiringTarget {
    Resource,
    Controller,
    Webhook,
}

impl WiringTarget {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Controller => "controller",
            Self::Webhook => "webhook",
        }
    }
}

impl fmt::Display for WiringTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which wirings the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringFlags {
    pub resource: bool,
    pub controller: bool,
    pub webhook: bool,
}

impl WiringFlags {
    pub const fn none() -> Self {
        Self {
            resource: false,
            controller: false,
            webhook: false,
        }
    }

    pub const fn webhook() -> Self {
        Self {
            resource: false,
            controller: false,
            webhook: true,
        }
    }

    /// Requested targets in processing order.
    pub fn targets(&self) -> Vec<WiringTarget> {
        let mut targets = Vec::new();
        if self.resource {
            targets.push(WiringTarget::Resource);
        }
        if self.controller {
            targets.push(WiringTarget::Controller);
        }
        if self.webhook {
            targets.push(WiringTarget::Webhook);
        }
        targets
    }

    pub fn is_empty(&self) -> bool {
        !(self.resource || self.controller || self.webhook)
    }
}

// ── ProducerKind ──────────────────────────────────────────────────────────────

/// Whether a producer emits per-entity source or a shared config manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProducerClass {
    Source,
    Manifest,
}

/// Every file producer the engine knows about.
///
/// The version policy hands these out; adapters turn them into concrete
/// [`FileProducer`](crate::application::ports::FileProducer) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProducerKind {
    Types,
    Controller,
    Webhook,
    WebhookKustomization,
    AddToScheme,
    AddController,
}

impl ProducerKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Types => "types",
            Self::Controller => "controller",
            Self::Webhook => "webhook",
            Self::WebhookKustomization => "webhook-kustomization",
            Self::AddToScheme => "add-to-scheme",
            Self::AddController => "add-controller",
        }
    }

    pub const fn class(&self) -> ProducerClass {
        match self {
            Self::WebhookKustomization => ProducerClass::Manifest,
            _ => ProducerClass::Source,
        }
    }

    /// Capabilities this producer can render sections for.
    pub const fn capabilities(&self) -> &'static [Capability] {
        match self {
            Self::Webhook => &Capability::ALL,
            _ => &[],
        }
    }
}

impl fmt::Display for ProducerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_version_parses_known_tags() {
        assert_eq!("1".parse::<ProjectVersion>().unwrap(), ProjectVersion::V1);
        assert_eq!("2".parse::<ProjectVersion>().unwrap(), ProjectVersion::V2);
        assert_eq!("\"2\"".parse::<ProjectVersion>().unwrap(), ProjectVersion::V2);
    }

    #[test]
    fn project_version_rejects_unknown_tags() {
        let err = "3-alpha".parse::<ProjectVersion>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnsupportedProjectVersion {
                version: "3-alpha".into()
            }
        );
        assert!("".parse::<ProjectVersion>().is_err());
    }

    #[test]
    fn wiring_flags_targets_follow_fixed_order() {
        let flags = WiringFlags {
            resource: true,
            controller: false,
            webhook: true,
        };
        assert_eq!(
            flags.targets(),
            vec![WiringTarget::Resource, WiringTarget::Webhook]
        );
        assert!(WiringFlags::none().is_empty());
        assert!(WiringFlags::none().targets().is_empty());
    }

    #[test]
    fn only_webhook_declares_capabilities() {
        assert_eq!(ProducerKind::Webhook.capabilities(), &Capability::ALL);
        assert!(ProducerKind::Types.capabilities().is_empty());
        assert_eq!(
            ProducerKind::WebhookKustomization.class(),
            ProducerClass::Manifest
        );
    }
}
