//! Shared fixtures: a minimal version 2 operator project on disk.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const MAIN_GO: &str = r#"package main

import (
	"flag"
	"os"

	"k8s.io/apimachinery/pkg/runtime"
	clientgoscheme "k8s.io/client-go/kubernetes/scheme"
	ctrl "sigs.k8s.io/controller-runtime"
	// +kubebuilder:scaffold:imports
)

var (
	scheme   = runtime.NewScheme()
	setupLog = ctrl.Log.WithName("setup")
)

func init() {
	_ = clientgoscheme.AddToScheme(scheme)

	// +kubebuilder:scaffold:scheme
}

func main() {
	flag.Parse()

	mgr, err := ctrl.NewManager(ctrl.GetConfigOrDie(), ctrl.Options{Scheme: scheme})
	if err != nil {
		setupLog.Error(err, "unable to start manager")
		os.Exit(1)
	}

	// +kubebuilder:scaffold:builder

	setupLog.Info("starting manager")
	if err := mgr.Start(ctrl.SetupSignalHandler()); err != nil {
		os.Exit(1)
	}
}
"#;

pub const BOILERPLATE: &str = "/*\nCopyright YEAR The Kubernetes authors.\n*/\n";

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// A version 2 project with `main.go` and a boilerplate file.
    pub fn v2() -> Self {
        let project = Self::with_project_file(
            "version: \"2\"\ndomain: tutorial.io\nrepo: tutorial.kubebuilder.io/project\n",
        );
        project.write("main.go", MAIN_GO);
        project
    }

    pub fn with_project_file(content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PROJECT"), content).unwrap();
        fs::create_dir_all(dir.path().join("hack")).unwrap();
        fs::write(dir.path().join("hack/boilerplate.go.txt"), BOILERPLATE).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.file(relative)).unwrap()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.file(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// `kubeforge` rooted at this project. `HOME` points into the temp dir so
    /// the user's own config never leaks in.
    pub fn kubeforge(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kubeforge");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--project-dir")
            .arg(self.path());
        cmd
    }

    pub fn create_webhook(&self, extra: &[&str]) -> Command {
        let mut cmd = self.kubeforge();
        cmd.args([
            "create", "webhook", "--group", "batch", "--version", "v1", "--kind", "CronJob",
        ])
        .args(extra);
        cmd
    }

    pub fn create_api(&self, extra: &[&str]) -> Command {
        let mut cmd = self.kubeforge();
        cmd.args([
            "create", "api", "--group", "batch", "--version", "v1", "--kind", "CronJob",
        ])
        .args(extra);
        cmd
    }
}
