//! File producers backed by the built-in templates.

use kubeforge_core::{
    application::ports::FileProducer,
    domain::{ProducerKind, TemplateBody, TemplateContext},
    error::ForgeResult,
};

use crate::builtin_templates::template_for;

/// Producer for one built-in file kind.
///
/// Path and conflict policy come from the context's version policy unless
/// the context overrides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinProducer {
    kind: ProducerKind,
}

impl BuiltinProducer {
    pub const fn new(kind: ProducerKind) -> Self {
        Self { kind }
    }
}

impl FileProducer for BuiltinProducer {
    fn kind(&self) -> ProducerKind {
        self.kind
    }

    fn template(&self, ctx: &TemplateContext) -> ForgeResult<TemplateBody> {
        Ok(template_for(self.kind, ctx.project_version())?)
    }
}

pub fn producer_for(kind: ProducerKind) -> Box<dyn FileProducer> {
    Box::new(BuiltinProducer::new(kind))
}

/// Boxed producers in the given order.
pub fn producers_for(kinds: &[ProducerKind]) -> Vec<Box<dyn FileProducer>> {
    kinds.iter().copied().map(producer_for).collect()
}
