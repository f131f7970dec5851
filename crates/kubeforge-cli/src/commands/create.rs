//! Shared `create` pipeline: resolve the project, scaffold, then wire.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use kubeforge_adapters::{LocalFilesystem, SimpleRenderer, producers_for};
use kubeforge_core::{
    application::{Outcome, ScaffoldReport, ScaffoldService, WiringReport, WiringUpdater},
    domain::{
        Capability, ConflictPolicy, ProducerKind, ResourceIdentity, TemplateContext, VersionPolicy,
        WiringFlags,
    },
    error::{ForgeError, ForgeResult},
};

use crate::{
    cli::{GlobalArgs, ResourceArgs},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, Status},
    project::{ProjectFile, load_boilerplate},
};

/// Which producer set a `create` subcommand runs.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Producers {
    Api { resource: bool, controller: bool },
    Webhook,
}

impl Producers {
    fn kinds(self, policy: &VersionPolicy) -> ForgeResult<Vec<ProducerKind>> {
        match self {
            Self::Api {
                resource,
                controller,
            } => Ok(policy.api_producers(resource, controller)),
            Self::Webhook => Ok(policy.webhook_producers()?),
        }
    }
}

/// What a `create` subcommand asks for once flags are interpreted.
pub(crate) struct CreateRequest {
    pub resource: ResourceArgs,
    pub producers: Producers,
    pub capabilities: Vec<Capability>,
    pub wiring: WiringFlags,
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct CreateSummary<'a> {
    resource: String,
    scaffold: &'a ScaffoldReport,
    wiring: &'a WiringReport,
}

#[instrument(skip_all, fields(kind = %request.resource.kind))]
pub(crate) fn run(
    request: CreateRequest,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let root: PathBuf = global.project_dir.clone();
    let project = ProjectFile::load(&root)?;
    let policy = VersionPolicy::for_version(project.version);

    let mut identity = ResourceIdentity::new(
        &request.resource.group,
        &request.resource.version,
        &request.resource.kind,
        &project.domain,
    )
    .map_err(ForgeError::from)?;
    if let Some(plural) = &request.resource.plural {
        identity = identity.with_plural(plural).map_err(ForgeError::from)?;
    }

    let kinds = request.producers.kinds(&policy)?;
    let boilerplate = load_boilerplate(&root, &config.scaffold.boilerplate_path)?;

    let mut builder = TemplateContext::builder(identity.clone())
        .repo(&project.repo)
        .project_version(project.version)
        .boilerplate(boilerplate)
        .extension(&config.scaffold.file_extension);
    for capability in &request.capabilities {
        builder = builder.capability(*capability, true);
    }
    if request.force {
        builder = builder.conflict_policy(ConflictPolicy::Overwrite);
    }
    let ctx = builder.build().map_err(ForgeError::from)?;

    let service = ScaffoldService::new(
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        root.clone(),
    );
    let report = service.execute(&producers_for(&kinds), &ctx)?;

    let updater = WiringUpdater::new(Box::new(LocalFilesystem::new()), policy, &project.repo);
    let wiring = updater.update_wiring(&root.join(policy.entry_file()), &identity, request.wiring)?;

    info!(
        written = report.written().count(),
        wired = wiring.applied.len(),
        "Create finished"
    );

    if output.is_json() {
        output.json(&CreateSummary {
            resource: identity.to_string(),
            scaffold: &report,
            wiring: &wiring,
        })?;
        return Ok(());
    }

    for result in &report.results {
        let line = format!("{} {}", result.outcome, result.path_display());
        match result.outcome {
            Outcome::Written => output.status(Status::Done, &line)?,
            _ => output.status(Status::Unchanged, &line)?,
        }
    }
    for marker in &wiring.applied {
        output.status(
            Status::Done,
            &format!("wired {marker} into {}", policy.entry_file()),
        )?;
    }
    if !wiring.already_present.is_empty() {
        output.status(
            Status::Unchanged,
            &format!("already wired: {}", wiring.already_present.join(", ")),
        )?;
    }
    output.summary(&format!("Scaffolded {identity}"))?;

    Ok(())
}
