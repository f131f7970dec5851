//! Wiring Updater - idempotent edits to the project entry file.
//!
//! One call runs load → locate → check → insert → commit as a critical
//! section: an in-process mutex plus the filesystem port's exclusive lock.
//! Every required anchor is located before any edit, so a missing anchor
//! leaves the file untouched. Re-running with the same inputs is a no-op.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        API_IMPORT, ResourceIdentity, VersionPolicy, WiringFlags, WiringMarker, contains_token,
        enclosing_block, find_anchor, identity_variables, import_binding, insert_before,
    },
    error::ForgeResult,
};

/// Markers touched by one `update_wiring` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WiringReport {
    /// Markers whose snippet was inserted by this call.
    pub applied: Vec<String>,
    /// Markers whose snippet was already present for this resource.
    pub already_present: Vec<String>,
}

impl WiringReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Applies version-specific wiring markers to an entry file.
pub struct WiringUpdater {
    filesystem: Box<dyn Filesystem>,
    policy: VersionPolicy,
    repo: String,
    guard: Mutex<()>,
}

impl WiringUpdater {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        policy: VersionPolicy,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            filesystem,
            policy,
            repo: repo.into(),
            guard: Mutex::new(()),
        }
    }

    /// Wire `resource` into `entry_file` for every requested flag.
    ///
    /// # Errors
    ///
    /// - `UnsupportedWiring` when the project version cannot wire a target
    /// - `EntryFileMissing` when `entry_file` does not exist
    /// - `MarkerNotFound` naming the first missing anchor; nothing is written
    /// - `WriteError` / `LockFailed` for I/O faults
    #[instrument(skip_all, fields(entry = %entry_file.display(), resource = %resource))]
    pub fn update_wiring(
        &self,
        entry_file: &Path,
        resource: &ResourceIdentity,
        flags: WiringFlags,
    ) -> ForgeResult<WiringReport> {
        let markers = self.markers_for(flags)?;
        if markers.is_empty() {
            debug!("No entry-file markers requested");
            return Ok(WiringReport::default());
        }

        let _in_process = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let _file_lock = self.filesystem.lock_exclusive(entry_file)?;
        debug!("Entry file locked");

        let original = self
            .filesystem
            .read_to_string(entry_file)?
            .ok_or_else(|| ApplicationError::EntryFileMissing {
                path: entry_file.to_path_buf(),
            })?;

        let lines: Vec<&str> = original.lines().collect();
        for marker in &markers {
            if find_anchor(&lines, marker.anchor).is_none() {
                return Err(ApplicationError::MarkerNotFound {
                    marker: marker.name.to_string(),
                    anchor: marker.anchor.to_string(),
                    path: entry_file.to_path_buf(),
                }
                .into());
            }
        }

        let vars = identity_variables(resource, &self.repo, &self.policy);
        if markers.iter().any(|m| m.name == API_IMPORT.name) {
            check_import_alias(&lines, &vars, entry_file)?;
        }

        let mut text = original.clone();
        let mut report = WiringReport::default();

        for marker in &markers {
            let token = marker.render_token(&vars)?;
            let lines: Vec<&str> = text.lines().collect();
            // Anchors are never removed, so every anchor found above is still present.
            let Some(anchor_line) = find_anchor(&lines, marker.anchor) else {
                continue;
            };

            let (start, end) = enclosing_block(&lines, anchor_line);
            if lines[start..=end].iter().any(|line| contains_token(line, &token)) {
                debug!(marker = marker.name, "Already wired");
                report.already_present.push(marker.name.to_string());
                continue;
            }

            let snippet = marker.render_snippet(&vars)?;
            text = insert_before(&text, anchor_line, &snippet);
            info!(marker = marker.name, "Inserted wiring");
            report.applied.push(marker.name.to_string());
        }

        if text != original {
            self.filesystem.write_atomic(entry_file, &text)?;
        }

        Ok(report)
    }

    /// Markers for every requested target, deduplicated by name.
    fn markers_for(&self, flags: WiringFlags) -> ForgeResult<Vec<WiringMarker>> {
        let mut markers: Vec<WiringMarker> = Vec::new();
        for target in flags.targets() {
            for marker in self.policy.wiring_markers(target)? {
                if !markers.iter().any(|m| m.name == marker.name) {
                    markers.push(marker);
                }
            }
        }
        Ok(markers)
    }
}

/// Fail if the resource's import alias is already bound to another package
/// inside the import block.
fn check_import_alias(
    lines: &[&str],
    vars: &BTreeMap<String, String>,
    entry_file: &Path,
) -> ForgeResult<()> {
    let (Some(alias), Some(package)) = (vars.get("IMPORT_ALIAS"), vars.get("PACKAGE_PATH")) else {
        return Ok(());
    };
    let Some(anchor) = find_anchor(lines, API_IMPORT.anchor) else {
        return Ok(());
    };
    let (start, end) = enclosing_block(lines, anchor);
    match import_binding(&lines[start..=end], alias) {
        Some(existing) if existing != format!("\"{package}\"") => {
            Err(ApplicationError::ImportAliasConflict {
                alias: alias.clone(),
                existing: existing.to_string(),
                wanted: package.clone(),
                path: entry_file.to_path_buf(),
            }
            .into())
        }
        _ => Ok(()),
    }
}
