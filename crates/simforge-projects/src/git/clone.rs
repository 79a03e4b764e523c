//! Repository cloning

use crate::error::{Error, Result};
use crate::process::CommandSpec;
use crate::workspace::Workspace;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::{debug, info};

/// What to clone and where to put it
///
/// `source` is the repository name on the remote, `target` the directory
/// name in the workspace. They differ only for aliased dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneTarget {
    pub source: String,
    pub target: String,
}

impl CloneTarget {
    /// Clone `name` into a directory of the same name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            target: name,
        }
    }

    /// Clone `source` into a directory named `target`
    pub fn aliased(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_aliased(&self) -> bool {
        self.source != self.target
    }

    /// Reject names that could escape the workspace or confuse git
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(Error::MissingName);
        }
        if self.target.trim().is_empty() {
            return Err(Error::MissingTarget);
        }
        for name in [&self.source, &self.target] {
            validate_name(name)?;
        }
        Ok(())
    }
}

impl From<&str> for CloneTarget {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for CloneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_aliased() {
            write!(f, "{} -> {}", self.source, self.target)
        } else {
            write!(f, "{}", self.source)
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.chars().any(char::is_whitespace) {
        return Err(Error::invalid_name(name, "must not contain whitespace"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::invalid_name(name, "must not contain path separators"));
    }
    if name == "." || name == ".." {
        return Err(Error::invalid_name(name, "must not be a relative path component"));
    }
    if name.starts_with('-') {
        return Err(Error::invalid_name(name, "must not start with '-'"));
    }
    Ok(())
}

/// Result of a successful clone call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// Freshly cloned
    Cloned(Utf8PathBuf),
    /// Target directory already existed; nothing was run
    AlreadyPresent(Utf8PathBuf),
}

impl CloneOutcome {
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Cloned(path) | Self::AlreadyPresent(path) => path,
        }
    }
}

/// Clone a project into the workspace root
///
/// # Returns
/// The path of the project directory, either freshly cloned or already
/// present.
///
/// # Errors
/// Returns error if:
/// - The source or target name is missing or malformed
/// - `git clone` cannot be started, exits non-zero, or times out
///
/// A failed clone may leave a partial directory behind.
pub async fn clone_project(ws: &Workspace, target: &CloneTarget) -> Result<CloneOutcome> {
    target.validate()?;

    let destination = ws.root().join(&target.target);
    if destination.exists() {
        debug!("Skipping {}, {} already exists", target, destination);
        ws.observer().on_clone_skipped(target, &destination);
        return Ok(CloneOutcome::AlreadyPresent(destination));
    }

    let url = ws.config().remote.repo_url(&target.source);
    info!("Cloning repository: {} -> {}", url, destination);
    ws.observer().on_clone_start(target, &url);

    let spec = CommandSpec::new("git")
        .arg("clone")
        .arg("--quiet")
        .arg(&url)
        .arg(destination.as_str())
        .current_dir(ws.root())
        .timeout(ws.config().timeouts.clone());

    let result = match ws.runner().run(&spec).await {
        Ok(outcome) if outcome.success() => Ok(CloneOutcome::Cloned(destination)),
        Ok(outcome) => {
            let message = if outcome.stderr.is_empty() {
                format!("git exited with {:?}", outcome.code)
            } else {
                outcome.stderr
            };
            Err(Error::clone_failed(&target.target, message))
        }
        Err(e) => Err(e),
    };

    match &result {
        Ok(outcome) => ws.observer().on_clone_finished(target, outcome.path()),
        Err(e) => ws.observer().on_clone_failed(target, e),
    }
    result
}
