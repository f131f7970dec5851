//! Scaffold Service - runs file producers.
//!
//! For each producer, in caller order:
//! 1. Resolve its path, template and conflict policy
//! 2. Render the template with the enabled, declared capabilities
//! 3. Hand the artifact to the [`ArtifactWriter`]
//!
//! Every producer is attempted. The overall call fails only afterwards, with
//! the complete report, so one run surfaces every conflicting file.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileProducer, Filesystem, TemplateRenderer},
        services::writer::{ArtifactWriter, FileArtifact, WriteOutcome},
    },
    domain::{Capability, ProducerKind, RelativePath, TemplateContext},
    error::{ForgeError, ForgeResult},
};

/// What happened to one producer's file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    Written,
    Skipped,
    /// The file exists and the policy refused to touch it.
    Conflict,
    /// Rendering or writing failed.
    Failed { reason: String },
}

impl Outcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Written | Self::Skipped)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written => f.write_str("written"),
            Self::Skipped => f.write_str("skipped"),
            Self::Conflict => f.write_str("already exists"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// One row of a [`ScaffoldReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProducerResult {
    pub producer: ProducerKind,
    /// `None` when the producer failed before its path was known.
    pub path: Option<RelativePath>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ProducerResult {
    pub fn path_display(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| format!("<{}>", self.producer), ToString::to_string)
    }
}

/// Per-producer outcomes in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub results: Vec<ProducerResult>,
}

impl ScaffoldReport {
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_complete())
    }

    /// Results that were neither written nor skipped.
    pub fn incomplete(&self) -> impl Iterator<Item = &ProducerResult> {
        self.results.iter().filter(|r| !r.outcome.is_complete())
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ProducerResult> {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Conflict)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProducerResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed { .. }))
    }

    pub fn written(&self) -> impl Iterator<Item = &ProducerResult> {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Written)
    }
}

impl fmt::Display for ScaffoldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let incomplete: Vec<String> = self
            .incomplete()
            .map(|r| format!("{} ({})", r.path_display(), r.outcome))
            .collect();
        write!(
            f,
            "{} of {} files could not be scaffolded: {}",
            incomplete.len(),
            self.results.len(),
            incomplete.join(", ")
        )
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    root: PathBuf,
}

impl ScaffoldService {
    /// Create a scaffold service writing below `root`.
    pub fn new(
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run every producer against `ctx`.
    ///
    /// # Errors
    ///
    /// `ScaffoldIncomplete` carrying the full report when any producer ended
    /// in a conflict or failure. Producers after a failing one still run.
    #[instrument(skip_all, fields(resource = %ctx.resource(), producers = producers.len()))]
    pub fn execute(
        &self,
        producers: &[Box<dyn FileProducer>],
        ctx: &TemplateContext,
    ) -> ForgeResult<ScaffoldReport> {
        let writer = ArtifactWriter::new(self.filesystem.as_ref(), &self.root);
        let requested = ctx.enabled_capabilities();
        let mut report = ScaffoldReport::default();

        for producer in producers {
            let result = self.run_one(&writer, producer.as_ref(), &requested, ctx);
            match &result.outcome {
                Outcome::Written | Outcome::Skipped => {
                    info!(producer = %result.producer, path = %result.path_display(), outcome = %result.outcome, "Producer finished");
                }
                Outcome::Conflict | Outcome::Failed { .. } => {
                    warn!(producer = %result.producer, path = %result.path_display(), outcome = %result.outcome, "Producer did not complete");
                }
            }
            report.results.push(result);
        }

        if report.is_complete() {
            Ok(report)
        } else {
            Err(ApplicationError::ScaffoldIncomplete { report }.into())
        }
    }

    fn run_one(
        &self,
        writer: &ArtifactWriter<'_>,
        producer: &dyn FileProducer,
        requested: &BTreeSet<Capability>,
        ctx: &TemplateContext,
    ) -> ProducerResult {
        let kind = producer.kind();
        let declared = producer.capabilities();

        for capability in requested.iter().filter(|c| !declared.contains(c)) {
            debug!(producer = %kind, %capability, "Capability not declared by producer, ignoring");
        }
        let enabled: BTreeSet<Capability> = requested
            .iter()
            .copied()
            .filter(|c| declared.contains(c))
            .collect();

        let input = match producer.input(ctx) {
            Ok(input) => input,
            Err(e) => {
                return ProducerResult {
                    producer: kind,
                    path: None,
                    outcome: Outcome::Failed {
                        reason: e.to_string(),
                    },
                };
            }
        };

        let outcome = self
            .renderer
            .render(&input.template, &enabled, ctx)
            .map(|content| FileArtifact {
                path: input.path.clone(),
                content,
                policy: input.policy,
            })
            .and_then(|artifact| writer.write(&artifact));

        ProducerResult {
            producer: kind,
            path: Some(input.path),
            outcome: match outcome {
                Ok(WriteOutcome::Written) => Outcome::Written,
                Ok(WriteOutcome::Skipped) => Outcome::Skipped,
                Err(ForgeError::Application(ApplicationError::FileExists { .. })) => {
                    Outcome::Conflict
                }
                Err(e) => Outcome::Failed {
                    reason: e.to_string(),
                },
            },
        }
    }
}
