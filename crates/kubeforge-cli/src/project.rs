//! The operator project on disk: its `PROJECT` file and license header.
//!
//! The engine never reads these itself; the CLI resolves them into a
//! [`ProjectVersion`], domain, repo and boilerplate text.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use kubeforge_core::{domain::ProjectVersion, error::ForgeError};

use crate::error::{CliError, CliResult, IntoCli};

pub const PROJECT_FILE: &str = "PROJECT";

#[derive(Debug, Deserialize)]
struct RawProjectFile {
    version: Option<serde_yaml::Value>,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    repo: String,
}

/// Settings read from the `PROJECT` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub version: ProjectVersion,
    pub domain: String,
    pub repo: String,
}

impl ProjectFile {
    /// Read `<root>/PROJECT`.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn load(root: &Path) -> CliResult<Self> {
        let path = root.join(PROJECT_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CliError::ProjectFileMissing { path });
            }
            Err(e) => {
                return Err(CliError::IoError {
                    message: format!("Failed to read {}", path.display()),
                    source: e,
                });
            }
        };
        let project = Self::parse(&path, &text)?;
        debug!(version = %project.version, domain = %project.domain, "Loaded PROJECT");
        Ok(project)
    }

    fn parse(path: &Path, text: &str) -> CliResult<Self> {
        let invalid = |reason: String| CliError::InvalidProjectFile {
            path: path.to_path_buf(),
            reason,
        };

        let raw: RawProjectFile = serde_yaml::from_str(text).map_err(|e| invalid(e.to_string()))?;

        // Older files write `version: 1` unquoted.
        let tag = match raw.version {
            Some(serde_yaml::Value::String(s)) => s,
            Some(serde_yaml::Value::Number(n)) => n.to_string(),
            Some(_) => return Err(invalid("'version' must be a string".into())),
            None => return Err(invalid("missing 'version'".into())),
        };
        let version = tag.parse::<ProjectVersion>().map_err(ForgeError::from)?;

        if raw.domain.trim().is_empty() {
            return Err(invalid("missing 'domain'".into()));
        }

        Ok(Self {
            version,
            domain: raw.domain,
            repo: raw.repo,
        })
    }
}

/// Load the license header and stamp the current year into it.
///
/// A missing file yields an empty header.
pub fn load_boilerplate(root: &Path, relative: &Path) -> CliResult<String> {
    let path: PathBuf = root.join(relative);
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(stamp_year(text.trim_end(), chrono::Local::now().year())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "No boilerplate file, generating without a header");
            Ok(String::new())
        }
        Err(e) => Err(e).with_cli_context(|| format!("Failed to read {}", path.display())),
    }
}

fn stamp_year(text: &str, year: i32) -> String {
    text.replace("YEAR", &year.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> CliResult<ProjectFile> {
        ProjectFile::parse(Path::new("PROJECT"), text)
    }

    #[test]
    fn parses_v2_project() {
        let project =
            parse("version: \"2\"\ndomain: tutorial.io\nrepo: tutorial.kubebuilder.io/project\n")
                .unwrap();
        assert_eq!(project.version, ProjectVersion::V2);
        assert_eq!(project.domain, "tutorial.io");
        assert_eq!(project.repo, "tutorial.kubebuilder.io/project");
    }

    #[test]
    fn accepts_unquoted_numeric_version() {
        let project = parse("version: 1\ndomain: example.com\n").unwrap();
        assert_eq!(project.version, ProjectVersion::V1);
        assert_eq!(project.repo, "");
    }

    #[test]
    fn unknown_version_is_a_user_error() {
        let err = parse("version: \"3-alpha\"\ndomain: example.com\n").unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_domain_is_rejected() {
        let err = parse("version: \"2\"\n").unwrap_err();
        assert!(matches!(err, CliError::InvalidProjectFile { .. }));
    }

    #[test]
    fn missing_project_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectFile::load(dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn boilerplate_year_is_stamped() {
        assert_eq!(
            stamp_year("/*\nCopyright YEAR The Authors.\n*/", 2026),
            "/*\nCopyright 2026 The Authors.\n*/"
        );
    }

    #[test]
    fn missing_boilerplate_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let text = load_boilerplate(dir.path(), Path::new("hack/boilerplate.go.txt")).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn boilerplate_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("hack")).unwrap();
        std::fs::write(dir.path().join("hack/boilerplate.go.txt"), "// header\n\n").unwrap();
        let text = load_boilerplate(dir.path(), Path::new("hack/boilerplate.go.txt")).unwrap();
        assert_eq!(text, "// header");
    }
}
