//! Project version policy.
//!
//! A pure lookup from the persisted project version to the producers, file
//! layout, default conflict policies and entry-file markers that apply to it.
//! Unknown version tags are a hard stop: a wrong marker set would corrupt the
//! entry file.

use crate::domain::{
    entities::{resource::ResourceIdentity, wiring::{WiringMarker, V2_MARKERS}},
    error::DomainError,
    value_objects::{ConflictPolicy, ProducerClass, ProducerKind, ProjectVersion, WiringTarget},
};

/// Version-specific scaffolding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionPolicy {
    version: ProjectVersion,
}

impl VersionPolicy {
    pub const fn for_version(version: ProjectVersion) -> Self {
        Self { version }
    }

    /// Look up the policy for a PROJECT file version tag.
    ///
    /// # Errors
    ///
    /// `UnsupportedProjectVersion` for any tag other than `1` or `2`.
    pub fn from_tag(tag: &str) -> Result<Self, DomainError> {
        Ok(Self::for_version(tag.parse()?))
    }

    pub const fn version(&self) -> ProjectVersion {
        self.version
    }

    /// Entry file wired by [`wiring_markers`](Self::wiring_markers), relative to the project root.
    pub const fn entry_file(&self) -> &'static str {
        match self.version {
            ProjectVersion::V1 => "cmd/manager/main.go",
            ProjectVersion::V2 => "main.go",
        }
    }

    /// Root directory holding API group packages.
    pub fn api_group_root(&self, resource: &ResourceIdentity) -> String {
        match self.version {
            ProjectVersion::V1 => format!("pkg/apis/{}", resource.group()),
            ProjectVersion::V2 => resource.group().to_string(),
        }
    }

    /// Directory of the versioned API package, relative to the project root.
    pub fn api_package_dir(&self, resource: &ResourceIdentity) -> String {
        format!("{}/{}", self.api_group_root(resource), resource.version())
    }

    /// Producers for `create api`.
    pub fn api_producers(&self, resource: bool, controller: bool) -> Vec<ProducerKind> {
        let mut producers = Vec::new();
        if resource {
            producers.push(ProducerKind::Types);
            if self.version == ProjectVersion::V1 {
                producers.push(ProducerKind::AddToScheme);
            }
        }
        if controller {
            producers.push(ProducerKind::Controller);
            if self.version == ProjectVersion::V1 {
                producers.push(ProducerKind::AddController);
            }
        }
        producers
    }

    /// Producers for `create webhook`.
    ///
    /// # Errors
    ///
    /// `UnsupportedWiring` for version 1 projects.
    pub fn webhook_producers(&self) -> Result<Vec<ProducerKind>, DomainError> {
        match self.version {
            ProjectVersion::V1 => Err(self.unsupported(WiringTarget::Webhook)),
            ProjectVersion::V2 => Ok(vec![
                ProducerKind::Webhook,
                ProducerKind::WebhookKustomization,
            ]),
        }
    }

    /// Default conflict policy for a producer.
    ///
    /// New per-entity sources must not clobber user edits, so they use
    /// `Error`; shared manifests and registration files use `Skip`.
    pub const fn default_policy(&self, producer: ProducerKind) -> ConflictPolicy {
        match (producer.class(), producer) {
            (ProducerClass::Manifest, _) => ConflictPolicy::Skip,
            (_, ProducerKind::AddToScheme | ProducerKind::AddController) => ConflictPolicy::Skip,
            (ProducerClass::Source, _) => ConflictPolicy::Error,
        }
    }

    /// Default output path of a producer for `resource`.
    ///
    /// Per-entity sources follow `<api-group-root>/<version>/<kind>_<suffix>.<ext>`;
    /// this layout is relied on by other tooling and must not change.
    pub fn default_path(
        &self,
        producer: ProducerKind,
        resource: &ResourceIdentity,
        extension: &str,
    ) -> String {
        let kind = resource.kind_lower();
        let api_dir = self.api_package_dir(resource);
        match (self.version, producer) {
            (_, ProducerKind::Types) => format!("{api_dir}/{kind}_types.{extension}"),
            (_, ProducerKind::Webhook) => format!("{api_dir}/{kind}_webhook.{extension}"),
            (ProjectVersion::V1, ProducerKind::Controller) => {
                format!("pkg/controller/{kind}/{kind}_controller.{extension}")
            }
            (ProjectVersion::V2, ProducerKind::Controller) => {
                format!("controllers/{kind}_controller.{extension}")
            }
            (_, ProducerKind::WebhookKustomization) => "config/webhook/kustomization.yaml".into(),
            (_, ProducerKind::AddToScheme) => format!(
                "pkg/apis/add_{}_{}.{extension}",
                resource.group().replace(['.', '-'], "_"),
                resource.version()
            ),
            (_, ProducerKind::AddController) => {
                format!("pkg/controller/add_{kind}.{extension}")
            }
        }
    }

    /// Entry-file markers needed for one wiring target.
    ///
    /// Version 1 projects wire resources and controllers through generated
    /// `add_*` files, so they have no entry-file markers for those targets.
    ///
    /// # Errors
    ///
    /// `UnsupportedWiring` for webhook wiring on version 1 projects.
    pub fn wiring_markers(&self, target: WiringTarget) -> Result<Vec<WiringMarker>, DomainError> {
        match (self.version, target) {
            (ProjectVersion::V1, WiringTarget::Webhook) => Err(self.unsupported(target)),
            (ProjectVersion::V1, _) => Ok(Vec::new()),
            (ProjectVersion::V2, _) => Ok(V2_MARKERS
                .iter()
                .filter(|marker| marker.serves(target))
                .cloned()
                .collect()),
        }
    }

    fn unsupported(&self, target: WiringTarget) -> DomainError {
        DomainError::UnsupportedWiring {
            version: self.version.to_string(),
            target: target.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cronjob() -> ResourceIdentity {
        ResourceIdentity::new("batch", "v1", "CronJob", "tutorial.io").unwrap()
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(matches!(
            VersionPolicy::from_tag("3"),
            Err(DomainError::UnsupportedProjectVersion { .. })
        ));
        assert_eq!(
            VersionPolicy::from_tag("2").unwrap().version(),
            ProjectVersion::V2
        );
    }

    #[test]
    fn v2_layout_is_group_version_kind() {
        let policy = VersionPolicy::for_version(ProjectVersion::V2);
        let res = cronjob();
        assert_eq!(
            policy.default_path(ProducerKind::Webhook, &res, "go"),
            "batch/v1/cronjob_webhook.go"
        );
        assert_eq!(
            policy.default_path(ProducerKind::Types, &res, "go"),
            "batch/v1/cronjob_types.go"
        );
        assert_eq!(
            policy.default_path(ProducerKind::Controller, &res, "go"),
            "controllers/cronjob_controller.go"
        );
        assert_eq!(policy.entry_file(), "main.go");
    }

    #[test]
    fn v1_layout_uses_pkg_tree() {
        let policy = VersionPolicy::for_version(ProjectVersion::V1);
        let res = cronjob();
        assert_eq!(
            policy.default_path(ProducerKind::Types, &res, "go"),
            "pkg/apis/batch/v1/cronjob_types.go"
        );
        assert_eq!(
            policy.default_path(ProducerKind::AddToScheme, &res, "go"),
            "pkg/apis/add_batch_v1.go"
        );
        assert_eq!(
            policy.default_path(ProducerKind::AddController, &res, "go"),
            "pkg/controller/add_cronjob.go"
        );
    }

    #[test]
    fn producer_sets_differ_by_version() {
        let v1 = VersionPolicy::for_version(ProjectVersion::V1);
        let v2 = VersionPolicy::for_version(ProjectVersion::V2);
        assert_eq!(
            v2.api_producers(true, true),
            vec![ProducerKind::Types, ProducerKind::Controller]
        );
        assert_eq!(
            v1.api_producers(true, true),
            vec![
                ProducerKind::Types,
                ProducerKind::AddToScheme,
                ProducerKind::Controller,
                ProducerKind::AddController
            ]
        );
        assert!(v1.webhook_producers().is_err());
        assert_eq!(v2.webhook_producers().unwrap().len(), 2);
    }

    #[test]
    fn default_policies() {
        let policy = VersionPolicy::for_version(ProjectVersion::V2);
        assert_eq!(
            policy.default_policy(ProducerKind::Webhook),
            ConflictPolicy::Error
        );
        assert_eq!(
            policy.default_policy(ProducerKind::WebhookKustomization),
            ConflictPolicy::Skip
        );
        assert_eq!(
            policy.default_policy(ProducerKind::AddToScheme),
            ConflictPolicy::Skip
        );
    }

    #[test]
    fn marker_selection() {
        let v2 = VersionPolicy::for_version(ProjectVersion::V2);
        let names = |target| {
            v2.wiring_markers(target)
                .unwrap()
                .iter()
                .map(|m| m.name)
                .collect::<Vec<_>>()
        };
        assert_eq!(names(WiringTarget::Resource), vec!["imports", "scheme"]);
        assert_eq!(
            names(WiringTarget::Controller),
            vec!["controller-imports", "controller-builder"]
        );
        assert_eq!(
            names(WiringTarget::Webhook),
            vec!["imports", "webhook-builder"]
        );

        let v1 = VersionPolicy::for_version(ProjectVersion::V1);
        assert!(v1.wiring_markers(WiringTarget::Resource).unwrap().is_empty());
        assert!(matches!(
            v1.wiring_markers(WiringTarget::Webhook),
            Err(DomainError::UnsupportedWiring { .. })
        ));
    }
}
