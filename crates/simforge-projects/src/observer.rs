//! Progress observation
//!
//! Orchestration steps report what they are doing through a
//! [`ProgressObserver`]. The CLI renders these events as tagged console
//! lines; library callers that don't care use [`NoOpObserver`].

use crate::error::Error;
use crate::git::CloneTarget;
use crate::process::{CommandSpec, OutputLine};
use camino::Utf8Path;

/// Observer trait for orchestration events
///
/// Every method has an empty default so implementors only override what
/// they render.
pub trait ProgressObserver: Send + Sync {
    /// A clone is about to start
    fn on_clone_start(&self, target: &CloneTarget, url: &str) {
        let _ = (target, url);
    }

    /// The target directory already exists; nothing was cloned
    fn on_clone_skipped(&self, target: &CloneTarget, path: &Utf8Path) {
        let _ = (target, path);
    }

    /// A clone finished successfully
    fn on_clone_finished(&self, target: &CloneTarget, path: &Utf8Path) {
        let _ = (target, path);
    }

    /// A clone failed
    fn on_clone_failed(&self, target: &CloneTarget, error: &Error) {
        let _ = (target, error);
    }

    /// Dependency resolution is about to clone `count` entries
    fn on_resolve_start(&self, count: usize) {
        let _ = count;
    }

    /// Package install is about to start in `dir`
    fn on_install_start(&self, dir: &str) {
        let _ = dir;
    }

    /// Package install finished in `dir`
    fn on_install_finished(&self, dir: &str) {
        let _ = dir;
    }

    /// Package install failed in `dir`
    fn on_install_failed(&self, dir: &str, error: &Error) {
        let _ = (dir, error);
    }

    /// The build script is about to run for `project`
    fn on_build_start(&self, project: &str) {
        let _ = project;
    }

    /// The watch server is about to start
    fn on_dev_server_start(&self, command: &CommandSpec) {
        let _ = command;
    }

    /// A line of streamed output from a build or the watch server
    fn on_output(&self, line: &OutputLine) {
        let _ = line;
    }
}

/// A no-op observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ProgressObserver for NoOpObserver {}
