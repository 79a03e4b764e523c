//! Error types for simforge-projects

use thiserror::Error;

/// Result type alias using simforge-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project orchestration error types
#[derive(Error, Debug)]
pub enum Error {
    /// No name given
    #[error("Please provide a project name")]
    MissingName,

    /// No clone target given
    #[error("Please provide a target name")]
    MissingTarget,

    /// Name cannot be used as a repository or directory name
    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Nothing in the working directory qualifies as a project
    #[error("There is no project in {dir}")]
    NoProjects { dir: String },

    /// Named directory is not one of the discovered projects
    #[error("'{name}' is not a project in {dir}")]
    UnknownProject { name: String, dir: String },

    /// Directory does not exist
    #[error("Directory does not exist: {path}")]
    DirectoryNotFound { path: String },

    /// Path exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// git clone failed
    #[error("Failed to clone {target}: {message}")]
    CloneFailed { target: String, message: String },

    /// Package install failed
    #[error("Error while installing dependencies for {dir} ({})", exit_label(.code))]
    InstallFailed { dir: String, code: Option<i32> },

    /// A dev-server core dependency could not be installed
    #[error("Error while installing core dependency {name}")]
    CoreDependencyFailed {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// Build script failed
    #[error("Build failed for {project} ({})", exit_label(.code))]
    BuildFailed { project: String, code: Option<i32> },

    /// Process could not be spawned or waited on
    #[error("Process execution failed: {0}")]
    ProcessExecution(String),

    /// Process exceeded its configured time limit
    #[error("{command} timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error(transparent)]
    Core(#[from] simforge_core::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a no projects error
    pub fn no_projects(dir: impl Into<String>) -> Self {
        Self::NoProjects { dir: dir.into() }
    }

    /// Create an unknown project error
    pub fn unknown_project(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self::UnknownProject {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// Create a directory not found error
    pub fn directory_not_found(path: impl Into<String>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Create a not a directory error
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a clone failed error
    pub fn clone_failed(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CloneFailed {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create an install failed error
    pub fn install_failed(dir: impl Into<String>, code: Option<i32>) -> Self {
        Self::InstallFailed {
            dir: dir.into(),
            code,
        }
    }

    /// Create a core dependency error
    pub fn core_dependency_failed(name: impl Into<String>, source: Error) -> Self {
        Self::CoreDependencyFailed {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Create a build failed error
    pub fn build_failed(project: impl Into<String>, code: Option<i32>) -> Self {
        Self::BuildFailed {
            project: project.into(),
            code,
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }

    /// Create a timeout error
    pub fn timeout(command: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            command: command.into(),
            secs,
        }
    }
}
