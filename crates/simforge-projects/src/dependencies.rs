//! Dependency resolution
//!
//! Reads a project's dependency manifest and clones every entry that tracks
//! the mainline branch, one after another. A failed clone is recorded and
//! the remaining entries still run.

use crate::error::{Error, Result};
use crate::git::{clone_project, CloneOutcome, CloneTarget};
use crate::workspace::Workspace;
use simforge_core::config::DependenciesConfig;
use simforge_core::DependencyManifest;
use tracing::{info, warn};

/// Outcome for a single manifest entry
#[derive(Debug)]
pub struct ResolvedEntry {
    pub target: CloneTarget,
    pub result: Result<CloneOutcome>,
}

/// Per-entry results of a resolution run, in manifest order
#[derive(Debug, Default)]
pub struct ResolveReport {
    pub entries: Vec<ResolvedEntry>,
}

impl ResolveReport {
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&CloneTarget, &Error)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (&e.target, err)))
    }
}

/// Clone targets for every mainline entry, aliases applied
pub fn plan_dependencies(
    manifest: &DependencyManifest,
    config: &DependenciesConfig,
) -> Vec<CloneTarget> {
    manifest
        .tracking(&config.mainline_branch)
        .map(|name| match config.resolve_alias(name) {
            Some(source) => CloneTarget::aliased(source, name),
            None => CloneTarget::new(name),
        })
        .collect()
}

/// Resolve and clone the dependencies of the project in `dir`
///
/// `dir` is taken as-is when absolute, otherwise relative to the workspace
/// root.
///
/// # Errors
/// Fails before any clone if the directory or its manifest is missing,
/// unparsable, or empty. Clone failures are reported per entry, never here.
pub async fn resolve_dependencies(ws: &Workspace, dir: &str) -> Result<ResolveReport> {
    if dir.trim().is_empty() {
        return Err(Error::MissingName);
    }

    let project_dir = ws.existing_dir(dir)?;
    let deps_config = &ws.config().dependencies;
    let manifest = DependencyManifest::load(&project_dir, &deps_config.manifest_file)?;

    let queue = plan_dependencies(&manifest, deps_config);
    info!(
        "Resolving {} of {} dependencies for {}",
        queue.len(),
        manifest.len(),
        project_dir
    );
    ws.observer().on_resolve_start(queue.len());

    let mut report = ResolveReport::default();
    for target in queue {
        let result = clone_project(ws, &target).await;
        if let Err(e) = &result {
            warn!("Dependency {} failed: {}", target, e);
        }
        report.entries.push(ResolvedEntry { target, result });
    }

    info!(
        "Cloning finished: {} success, {} fail",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}
