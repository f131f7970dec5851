//! Simple variable substitution renderer.

use std::collections::BTreeSet;

use kubeforge_core::{
    application::ports::TemplateRenderer,
    domain::{Capability, TemplateBody, TemplateContext},
    error::ForgeResult,
};
use tracing::{instrument, trace};

/// Renderer composing gated sections and substituting `{{ VAR }}` strictly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.name()))]
    fn render(
        &self,
        template: &TemplateBody,
        enabled: &BTreeSet<Capability>,
        context: &TemplateContext,
    ) -> ForgeResult<String> {
        let composed = template.compose(enabled);
        trace!(bytes = composed.len(), sections = enabled.len(), "Template composed");
        Ok(context.render(template.name(), &composed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeforge_core::domain::{DomainError, ResourceIdentity};
    use kubeforge_core::error::ForgeError;

    fn context() -> TemplateContext {
        let res = ResourceIdentity::new("batch", "v1", "CronJob", "tutorial.io").unwrap();
        TemplateContext::builder(res)
            .boilerplate("// Copyright 2026.")
            .build()
            .unwrap()
    }

    fn body() -> TemplateBody {
        TemplateBody::new("webhook", "{{ BOILERPLATE }}\ntype {{ KIND }} struct{}\n")
            .with_section(Capability::Defaulting, "// default {{ PLURAL }}\n")
            .unwrap()
            .with_section(Capability::Validation, "// validate {{ PLURAL }}\n")
            .unwrap()
    }

    #[test]
    fn renders_base_and_enabled_sections() {
        let out = SimpleRenderer::new()
            .render(&body(), &BTreeSet::from([Capability::Validation]), &context())
            .unwrap();
        assert_eq!(
            out,
            "// Copyright 2026.\ntype CronJob struct{}\n// validate cronjobs\n"
        );
    }

    #[test]
    fn same_renderer_gives_independent_results() {
        let renderer = SimpleRenderer::new();
        let body = body();
        let both = renderer
            .render(&body, &BTreeSet::from(Capability::ALL), &context())
            .unwrap();
        let none = renderer.render(&body, &BTreeSet::new(), &context()).unwrap();
        assert!(both.contains("default") && both.contains("validate"));
        assert!(!none.contains("default") && !none.contains("validate"));
    }

    #[test]
    fn unknown_fields_are_template_errors() {
        let body = TemplateBody::new("broken", "{{ .Resource.Kind }}");
        let err = SimpleRenderer::new()
            .render(&body, &BTreeSet::new(), &context())
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::TemplateError { .. })
        ));
    }
}
