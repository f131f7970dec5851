//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kubeforge-adapters` crate provides implementations.

use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::{
    Capability, ConflictPolicy, ProducerKind, RelativePath, TemplateBody, TemplateContext,
};
use crate::error::ForgeResult;

/// Held while a file is locked. Dropping it releases the lock.
pub trait FileLock: Send {}

/// Lock guard for filesystems without real locking.
#[derive(Debug, Default)]
pub struct NoopLock;

impl FileLock for NoopLock {}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kubeforge_adapters::filesystem::LocalFilesystem` (production)
/// - `kubeforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_atomic` either replaces the whole file or leaves it untouched
/// - Parent directories are created by `write_atomic` as needed
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a UTF-8 file. `Ok(None)` when it does not exist.
    fn read_to_string(&self, path: &Path) -> ForgeResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Write the whole file atomically, creating parent directories.
    fn write_atomic(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Take an exclusive lock guarding read-modify-write cycles on `path`.
    fn lock_exclusive(&self, path: &Path) -> ForgeResult<Box<dyn FileLock>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `kubeforge_adapters::renderer::SimpleRenderer` (strict `{{ VAR }}` substitution)
pub trait TemplateRenderer: Send + Sync {
    /// Compose `template` from its base and the `enabled` sections, then
    /// substitute the context's variables.
    fn render(
        &self,
        template: &TemplateBody,
        enabled: &BTreeSet<Capability>,
        context: &TemplateContext,
    ) -> ForgeResult<String>;
}

/// Everything the executor needs from one producer.
#[derive(Debug, Clone)]
pub struct ProducerInput {
    pub path: RelativePath,
    pub template: TemplateBody,
    pub policy: ConflictPolicy,
}

/// A component that produces exactly one file.
///
/// Capabilities are declared statically through [`FileProducer::capabilities`];
/// the executor never probes a producer for optional behaviour.
pub trait FileProducer: Send + Sync {
    fn kind(&self) -> ProducerKind;

    /// Template payload for this producer. May differ per project version.
    fn template(&self, ctx: &TemplateContext) -> ForgeResult<TemplateBody>;

    fn capabilities(&self) -> &'static [Capability] {
        self.kind().capabilities()
    }

    /// Resolve path, template and conflict policy for `ctx`.
    ///
    /// An explicit target path in the context wins over the layout default;
    /// a forced conflict policy wins over the producer's default.
    fn input(&self, ctx: &TemplateContext) -> ForgeResult<ProducerInput> {
        let kind = self.kind();
        let policy = ctx.policy();

        let path = match ctx.target_path(kind) {
            Some(path) => path.clone(),
            None => RelativePath::try_new(policy.default_path(
                kind,
                ctx.resource(),
                ctx.extension(),
            ))?,
        };

        Ok(ProducerInput {
            path,
            template: self.template(ctx)?,
            policy: ctx
                .conflict_policy()
                .unwrap_or_else(|| policy.default_policy(kind)),
        })
    }
}
