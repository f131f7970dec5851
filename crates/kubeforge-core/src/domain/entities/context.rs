//! Template context: everything a producer and the renderer need for one
//! scaffold invocation.
//!
//! ## Built-in Variables
//!
//! | Variable | Example |
//! |----------|---------|
//! | `BOILERPLATE` | license header text |
//! | `GROUP` / `VERSION` / `KIND` / `DOMAIN` | `batch` / `v1` / `CronJob` / `tutorial.io` |
//! | `KIND_LOWER` / `PLURAL` | `cronjob` / `cronjobs` |
//! | `GROUP_DOMAIN` / `GROUP_DOMAIN_DASHED` | `batch.tutorial.io` / `batch-tutorial-io` |
//! | `IMPORT_ALIAS` | `batchv1` |
//! | `REPO` / `PACKAGE_PATH` | `example.com/proj` / `example.com/proj/batch/v1` |
//! | `MUTATING_PATH` / `VALIDATING_PATH` | `/mutate-batch-tutorial-io-v1-cronjob` |
//! | `OPTION_<NAME>` | every text option, name upper-snake-cased |

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    entities::{common::RelativePath, resource::ResourceIdentity, template::render_template},
    error::DomainError,
    policy::VersionPolicy,
    value_objects::{Capability, ConflictPolicy, ProducerKind, ProjectVersion},
};

/// Default extension for generated source files.
pub const DEFAULT_EXTENSION: &str = "go";

/// A named option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

/// Immutable configuration bundle for one scaffold invocation.
///
/// Built through [`TemplateContextBuilder`]; nothing is mutated after
/// `build()`.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    boilerplate: String,
    resource: ResourceIdentity,
    repo: String,
    project_version: ProjectVersion,
    extension: String,
    options: BTreeMap<String, OptionValue>,
    target_paths: BTreeMap<ProducerKind, RelativePath>,
    conflict_policy: Option<ConflictPolicy>,
    variables: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn builder(resource: ResourceIdentity) -> TemplateContextBuilder {
        TemplateContextBuilder::new(resource)
    }

    pub fn boilerplate(&self) -> &str {
        &self.boilerplate
    }

    pub fn resource(&self) -> &ResourceIdentity {
        &self.resource
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn project_version(&self) -> ProjectVersion {
        self.project_version
    }

    pub fn policy(&self) -> VersionPolicy {
        VersionPolicy::for_version(self.project_version)
    }

    /// Extension for generated source files, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Whether a boolean option is set to `true`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.options.get(name), Some(OptionValue::Flag(true)))
    }

    /// Capabilities switched on through their boolean options.
    pub fn enabled_capabilities(&self) -> BTreeSet<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.flag(cap.as_str()))
            .collect()
    }

    /// Explicit target path for a producer, if the caller set one.
    pub fn target_path(&self, producer: ProducerKind) -> Option<&RelativePath> {
        self.target_paths.get(&producer)
    }

    /// Caller-forced conflict policy; `None` means each producer's default.
    pub fn conflict_policy(&self) -> Option<ConflictPolicy> {
        self.conflict_policy
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Render `body` against this context's variables.
    pub fn render(&self, template: &str, body: &str) -> Result<String, DomainError> {
        render_template(template, body, &self.variables)
    }
}

/// Builder for [`TemplateContext`].
#[derive(Debug, Clone)]
pub struct TemplateContextBuilder {
    resource: ResourceIdentity,
    boilerplate: String,
    repo: String,
    project_version: ProjectVersion,
    extension: String,
    options: BTreeMap<String, OptionValue>,
    target_paths: BTreeMap<ProducerKind, RelativePath>,
    conflict_policy: Option<ConflictPolicy>,
}

impl TemplateContextBuilder {
    fn new(resource: ResourceIdentity) -> Self {
        Self {
            resource,
            boilerplate: String::new(),
            repo: String::new(),
            project_version: ProjectVersion::V2,
            extension: DEFAULT_EXTENSION.to_string(),
            options: BTreeMap::new(),
            target_paths: BTreeMap::new(),
            conflict_policy: None,
        }
    }

    pub fn boilerplate(mut self, text: impl Into<String>) -> Self {
        self.boilerplate = text.into();
        self
    }

    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }

    pub fn project_version(mut self, version: ProjectVersion) -> Self {
        self.project_version = version;
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.options.insert(name.into(), OptionValue::Flag(value));
        self
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .insert(name.into(), OptionValue::Text(value.into()));
        self
    }

    pub fn capability(self, capability: Capability, enabled: bool) -> Self {
        self.flag(capability.as_str(), enabled)
    }

    /// Route one producer to an explicit path instead of its default.
    pub fn target_path(
        mut self,
        producer: ProducerKind,
        path: impl Into<std::path::PathBuf>,
    ) -> Result<Self, DomainError> {
        self.target_paths
            .insert(producer, RelativePath::try_new(path)?);
        Ok(self)
    }

    pub fn conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<TemplateContext, DomainError> {
        if self.extension.is_empty() || self.extension.contains(['/', '\\', '.']) {
            return Err(DomainError::invalid(
                "extension",
                &self.extension,
                "must be a bare extension such as 'go'",
            ));
        }

        let policy = VersionPolicy::for_version(self.project_version);
        let mut variables = identity_variables(&self.resource, &self.repo, &policy);
        variables.insert("BOILERPLATE".into(), self.boilerplate.clone());
        for (name, value) in &self.options {
            if let OptionValue::Text(text) = value {
                variables.insert(option_variable(name), text.clone());
            }
        }

        Ok(TemplateContext {
            boilerplate: self.boilerplate,
            resource: self.resource,
            repo: self.repo,
            project_version: self.project_version,
            extension: self.extension,
            options: self.options,
            target_paths: self.target_paths,
            conflict_policy: self.conflict_policy,
            variables,
        })
    }
}

/// Variables derived from the identity alone. Shared with entry-file wiring.
pub fn identity_variables(
    resource: &ResourceIdentity,
    repo: &str,
    policy: &VersionPolicy,
) -> BTreeMap<String, String> {
    let package_path = policy.api_package_dir(resource);
    let package_path = if repo.is_empty() {
        package_path
    } else {
        format!("{repo}/{package_path}")
    };

    [
        ("GROUP", resource.group().to_string()),
        ("VERSION", resource.version().to_string()),
        ("KIND", resource.kind().to_string()),
        ("KIND_LOWER", resource.kind_lower().to_string()),
        ("PLURAL", resource.plural().to_string()),
        ("DOMAIN", resource.domain().to_string()),
        ("GROUP_DOMAIN", resource.group_domain().to_string()),
        (
            "GROUP_DOMAIN_DASHED",
            resource.dashed_group_domain().to_string(),
        ),
        ("IMPORT_ALIAS", resource.import_alias().to_string()),
        ("REPO", repo.to_string()),
        ("PACKAGE_PATH", package_path),
        ("MUTATING_PATH", resource.mutating_webhook_path()),
        ("VALIDATING_PATH", resource.validating_webhook_path()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn option_variable(name: &str) -> String {
    format!(
        "OPTION_{}",
        name.to_ascii_uppercase().replace(['-', '.', ' '], "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> ResourceIdentity {
        ResourceIdentity::new("batch", "v1", "CronJob", "tutorial.io").unwrap()
    }

    #[test]
    fn variables_cover_identity_and_boilerplate() {
        let ctx = TemplateContext::builder(resource())
            .boilerplate("// header")
            .repo("example.com/proj")
            .build()
            .unwrap();

        let vars = ctx.variables();
        assert_eq!(vars["BOILERPLATE"], "// header");
        assert_eq!(vars["KIND_LOWER"], "cronjob");
        assert_eq!(vars["GROUP_DOMAIN_DASHED"], "batch-tutorial-io");
        assert_eq!(vars["PACKAGE_PATH"], "example.com/proj/batch/v1");
    }

    #[test]
    fn v1_package_path_uses_pkg_apis() {
        let ctx = TemplateContext::builder(resource())
            .repo("example.com/proj")
            .project_version(ProjectVersion::V1)
            .build()
            .unwrap();
        assert_eq!(
            ctx.variables()["PACKAGE_PATH"],
            "example.com/proj/pkg/apis/batch/v1"
        );
    }

    #[test]
    fn capabilities_follow_flags() {
        let ctx = TemplateContext::builder(resource())
            .capability(Capability::Defaulting, true)
            .capability(Capability::Validation, false)
            .build()
            .unwrap();
        assert_eq!(
            ctx.enabled_capabilities(),
            BTreeSet::from([Capability::Defaulting])
        );
    }

    #[test]
    fn text_options_become_variables() {
        let ctx = TemplateContext::builder(resource())
            .text("owner-team", "platform")
            .build()
            .unwrap();
        assert_eq!(ctx.variables()["OPTION_OWNER_TEAM"], "platform");
        assert_eq!(
            ctx.render("t", "{{ OPTION_OWNER_TEAM }}").unwrap(),
            "platform"
        );
    }

    #[test]
    fn target_paths_must_stay_inside_the_project() {
        let err = TemplateContext::builder(resource())
            .target_path(ProducerKind::Webhook, "../escape.go")
            .unwrap_err();
        assert!(matches!(err, DomainError::PathOutsideProject { .. }));
    }

    #[test]
    fn extension_is_normalized_and_checked() {
        let ctx = TemplateContext::builder(resource())
            .extension(".rs")
            .build()
            .unwrap();
        assert_eq!(ctx.extension(), "rs");
        assert!(
            TemplateContext::builder(resource())
                .extension("a/b")
                .build()
                .is_err()
        );
    }
}
