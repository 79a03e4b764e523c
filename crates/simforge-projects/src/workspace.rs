//! The working directory the orchestration steps operate in

use crate::error::{Error, Result};
use crate::observer::{NoOpObserver, ProgressObserver};
use crate::process::{CommandRunner, SystemRunner};
use camino::{Utf8Path, Utf8PathBuf};
use simforge_core::SimforgeConfig;
use std::fs;
use std::sync::Arc;

/// Working directory plus everything needed to act on it
///
/// Projects are cloned as immediate children of `root`.
#[derive(Clone)]
pub struct Workspace {
    root: Utf8PathBuf,
    config: SimforgeConfig,
    runner: Arc<dyn CommandRunner>,
    observer: Arc<dyn ProgressObserver>,
}

impl Workspace {
    /// Workspace that runs real processes and reports nothing
    pub fn new(root: impl Into<Utf8PathBuf>, config: SimforgeConfig) -> Self {
        Self {
            root: root.into(),
            config,
            runner: Arc::new(SystemRunner),
            observer: Arc::new(NoOpObserver),
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn config(&self) -> &SimforgeConfig {
        &self.config
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub(crate) fn observer(&self) -> &dyn ProgressObserver {
        self.observer.as_ref()
    }

    /// Resolve a user-supplied directory and require it to be a directory
    pub(crate) fn existing_dir(&self, input: &str) -> Result<Utf8PathBuf> {
        let dir = simforge_core::utils::resolve_dir(&self.root, input);
        if !dir.exists() {
            return Err(Error::directory_not_found(dir.as_str()));
        }
        if !dir.is_dir() {
            return Err(Error::not_a_directory(dir.as_str()));
        }
        Ok(dir)
    }

    /// Immediate subdirectories holding a dependency manifest, sorted by name
    pub fn discover_projects(&self) -> Result<Vec<String>> {
        let manifest = &self.config.dependencies.manifest_file;
        let mut projects = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if self.root.join(&name).join(manifest).is_file() {
                projects.push(name);
            }
        }

        projects.sort();
        Ok(projects)
    }
}
