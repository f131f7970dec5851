//! Public-API tests for kubeforge-core: scaffold then wire, using only the
//! prelude and an in-test filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kubeforge_core::application::{ApplicationError, NoopLock};
use kubeforge_core::prelude::*;

#[derive(Clone, Default)]
struct SharedFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl SharedFs {
    fn get(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    fn put(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
    }
}

impl Filesystem for SharedFs {
    fn read_to_string(&self, path: &Path) -> ForgeResult<Option<String>> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> ForgeResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn lock_exclusive(&self, _path: &Path) -> ForgeResult<Box<dyn FileLock>> {
        Ok(Box::new(NoopLock))
    }
}

/// Renders by composition plus strict substitution, like the real adapter.
struct Renderer;

impl TemplateRenderer for Renderer {
    fn render(
        &self,
        template: &TemplateBody,
        enabled: &BTreeSet<Capability>,
        context: &TemplateContext,
    ) -> ForgeResult<String> {
        Ok(context.render(template.name(), &template.compose(enabled))?)
    }
}

struct Webhook;

impl FileProducer for Webhook {
    fn kind(&self) -> ProducerKind {
        ProducerKind::Webhook
    }

    fn template(&self, _ctx: &TemplateContext) -> ForgeResult<TemplateBody> {
        Ok(TemplateBody::new("webhook", "package {{ VERSION }}\n")
            .with_section(Capability::Defaulting, "// mutate at {{ MUTATING_PATH }}\n")?
            .with_section(Capability::Validation, "// validate at {{ VALIDATING_PATH }}\n")?)
    }
}

const MAIN: &str = "package main

import (
\t\"os\"
\t// +kubebuilder:scaffold:imports
)

func init() {
\t// +kubebuilder:scaffold:scheme
}

func main() {
\t// +kubebuilder:scaffold:builder
\tos.Exit(0)
}
";

fn cronjob() -> ResourceIdentity {
    ResourceIdentity::new("batch", "v1", "CronJob", "tutorial.io").unwrap()
}

#[test]
fn defaulting_webhook_scaffold_then_wire() {
    let fs = SharedFs::default();
    fs.put("main.go", MAIN);

    let ctx = TemplateContext::builder(cronjob())
        .repo("tutorial.kubebuilder.io/project")
        .capability(Capability::Defaulting, true)
        .build()
        .unwrap();
    let producers: Vec<Box<dyn FileProducer>> = vec![Box::new(Webhook)];

    let report = ScaffoldService::new(Box::new(Renderer), Box::new(fs.clone()), "")
        .execute(&producers, &ctx)
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(
        fs.get("batch/v1/cronjob_webhook.go").as_deref(),
        Some("package v1\n// mutate at /mutate-batch-tutorial-io-v1-cronjob\n")
    );

    let updater = WiringUpdater::new(
        Box::new(fs.clone()),
        VersionPolicy::for_version(ProjectVersion::V2),
        "tutorial.kubebuilder.io/project",
    );
    let first = updater
        .update_wiring(Path::new("main.go"), &cronjob(), WiringFlags::webhook())
        .unwrap();
    assert_eq!(first.applied, vec!["imports", "webhook-builder"]);

    let wired = fs.get("main.go").unwrap();
    let second = updater
        .update_wiring(Path::new("main.go"), &cronjob(), WiringFlags::webhook())
        .unwrap();
    assert!(!second.changed());
    assert_eq!(fs.get("main.go").unwrap(), wired);
}

#[test]
fn conflicting_file_fails_scaffold_but_reports_every_producer() {
    let fs = SharedFs::default();
    fs.put("batch/v1/cronjob_webhook.go", "hand written\n");
    let ctx = TemplateContext::builder(cronjob()).build().unwrap();
    let producers: Vec<Box<dyn FileProducer>> = vec![Box::new(Webhook)];

    let err = ScaffoldService::new(Box::new(Renderer), Box::new(fs.clone()), "")
        .execute(&producers, &ctx)
        .unwrap_err();

    let ForgeError::Application(ApplicationError::ScaffoldIncomplete { report }) = err else {
        panic!("expected an incomplete scaffold");
    };
    assert_eq!(report.conflicts().count(), 1);
    assert_eq!(
        fs.get("batch/v1/cronjob_webhook.go").as_deref(),
        Some("hand written\n")
    );
}
