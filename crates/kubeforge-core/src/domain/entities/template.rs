//! Template bodies, capability-gated composition, and the strict placeholder
//! renderer.
//!
//! ## Composition
//!
//! A [`TemplateBody`] is a base section plus zero or more sections gated by a
//! [`Capability`]. [`TemplateBody::compose`] is a pure function: it never
//! mutates the body, so scaffolding several resources with different option
//! combinations in one process cannot leak sections between them.
//!
//! ```text
//! base ── defaulting? ── validation?      (declared order, always)
//! ```
//!
//! ## Placeholders
//!
//! `{{ NAME }}` is replaced by the value of `NAME`. Surrounding whitespace
//! inside the braces is ignored. Unknown names, empty placeholders and
//! unclosed braces are errors; nothing is left half-rendered.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::{error::DomainError, value_objects::Capability};

/// Template text, either compiled in or owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s.as_str(),
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

/// A section appended only when its capability is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatedSection {
    pub capability: Capability,
    pub body: TemplateSource,
}

/// A named template made of a base section and gated sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBody {
    name: String,
    base: TemplateSource,
    sections: Vec<GatedSection>,
}

impl TemplateBody {
    /// A template with no optional sections.
    pub fn new(name: impl Into<String>, base: impl Into<TemplateSource>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            sections: Vec::new(),
        }
    }

    /// Declare the next gated section.
    ///
    /// # Errors
    ///
    /// `TemplateError` if a section for `capability` is already declared.
    pub fn with_section(
        mut self,
        capability: Capability,
        body: impl Into<TemplateSource>,
    ) -> Result<Self, DomainError> {
        if self.sections.iter().any(|s| s.capability == capability) {
            return Err(DomainError::TemplateError {
                template: self.name.clone(),
                reason: format!("section '{capability}' declared twice"),
            });
        }
        self.sections.push(GatedSection {
            capability,
            body: body.into(),
        });
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capabilities this template has sections for, in declared order.
    pub fn declared_capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.sections.iter().map(|s| s.capability)
    }

    /// Concatenate the base section and every enabled section in declared order.
    pub fn compose(&self, enabled: &BTreeSet<Capability>) -> String {
        let mut out = String::from(self.base.as_str());
        for section in &self.sections {
            if enabled.contains(&section.capability) {
                out.push_str(section.body.as_str());
            }
        }
        out
    }
}

impl fmt::Display for TemplateBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Render `body` by substituting every `{{ NAME }}` from `vars`.
///
/// # Errors
///
/// `TemplateError` naming `template` when a placeholder is unclosed, empty,
/// malformed, or refers to a name missing from `vars`.
pub fn render_template(
    template: &str,
    body: &str,
    vars: &BTreeMap<String, String>,
) -> Result<String, DomainError> {
    let fail = |reason: String| DomainError::TemplateError {
        template: template.to_string(),
        reason,
    };

    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let close = after_open
            .find("}}")
            .ok_or_else(|| fail(format!("unclosed '{{{{' at byte {}", offset + open)))?;

        let key = after_open[..close].trim();
        if key.is_empty() {
            return Err(fail(format!("empty placeholder at byte {}", offset + open)));
        }
        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(fail(format!("malformed placeholder '{key}'")));
        }

        let value = vars
            .get(key)
            .ok_or_else(|| fail(format!("undefined field '{key}'")))?;
        out.push_str(value);

        let consumed = open + 2 + close + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("KIND".to_string(), "CronJob".to_string()),
            ("PLURAL".to_string(), "cronjobs".to_string()),
        ])
    }

    fn webhook() -> TemplateBody {
        TemplateBody::new("webhook", "base\n")
            .with_section(Capability::Defaulting, "defaulting\n")
            .unwrap()
            .with_section(Capability::Validation, "validation\n")
            .unwrap()
    }

    #[test]
    fn compose_appends_only_enabled_sections() {
        let body = webhook();
        assert_eq!(body.compose(&BTreeSet::new()), "base\n");
        assert_eq!(
            body.compose(&BTreeSet::from([Capability::Defaulting])),
            "base\ndefaulting\n"
        );
        assert_eq!(
            body.compose(&BTreeSet::from([Capability::Validation])),
            "base\nvalidation\n"
        );
    }

    #[test]
    fn compose_keeps_declared_order() {
        let both = BTreeSet::from([Capability::Validation, Capability::Defaulting]);
        assert_eq!(webhook().compose(&both), "base\ndefaulting\nvalidation\n");
    }

    #[test]
    fn compose_does_not_mutate_the_body() {
        let body = webhook();
        let before = body.clone();
        let _ = body.compose(&BTreeSet::from([Capability::Defaulting]));
        let _ = body.compose(&BTreeSet::from([Capability::Validation]));
        assert_eq!(body, before);
    }

    #[test]
    fn duplicate_sections_are_rejected() {
        let err = webhook()
            .with_section(Capability::Defaulting, "again")
            .unwrap_err();
        assert!(matches!(err, DomainError::TemplateError { .. }));
    }

    #[test]
    fn render_substitutes_placeholders() {
        let out = render_template("t", "kind={{ KIND }} res={{PLURAL}}{}", &vars()).unwrap();
        assert_eq!(out, "kind=CronJob res=cronjobs{}");
    }

    #[test]
    fn render_rejects_unknown_fields() {
        let err = render_template("t", "{{ NOPE }}", &vars()).unwrap_err();
        assert_eq!(
            err,
            DomainError::TemplateError {
                template: "t".into(),
                reason: "undefined field 'NOPE'".into()
            }
        );
    }

    #[test]
    fn render_rejects_malformed_syntax() {
        assert!(render_template("t", "abc {{ KIND", &vars()).is_err());
        assert!(render_template("t", "{{   }}", &vars()).is_err());
        assert!(render_template("t", "{{ .Kind }}", &vars()).is_err());
    }

    #[test]
    fn render_leaves_plain_text_alone() {
        let body = "func main() {\n\treturn\n}\n";
        assert_eq!(render_template("t", body, &vars()).unwrap(), body);
    }
}
