//! Configuration types
//!
//! Everything the orchestration layer would otherwise hard-code lives here:
//! the remote host, the alias table, the package-manager commands, and the
//! dev-server invocation. Defaults mirror `embedded/config/defaults.yaml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Complete simforge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SimforgeConfig {
    /// Where repositories are cloned from
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Dependency manifest handling
    #[serde(default)]
    pub dependencies: DependenciesConfig,

    /// Package manager invocation
    #[serde(default)]
    pub package_manager: PackageManagerConfig,

    /// Development watch server
    #[serde(default)]
    pub dev_server: DevServerConfig,

    /// Optional per-step time limits
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

/// Remote repository host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RemoteConfig {
    /// Host and organization prefix, e.g. `https://github.com/phetsims`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl RemoteConfig {
    /// Build the clone URL for a source repository name
    pub fn repo_url(&self, source: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), source)
    }
}

/// Dependency manifest settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependenciesConfig {
    /// File name of the dependency manifest inside a project
    #[serde(default = "default_dependencies_file")]
    pub manifest_file: String,

    /// Only entries tracking this branch are cloned
    #[serde(default = "default_mainline_branch")]
    pub mainline_branch: String,

    /// Canonical dependency name -> upstream repository name
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            manifest_file: default_dependencies_file(),
            mainline_branch: default_mainline_branch(),
            aliases: default_aliases(),
        }
    }
}

impl DependenciesConfig {
    /// Upstream source name for an aliased dependency
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }
}

/// Package manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageManagerConfig {
    /// Executable name
    #[serde(default = "default_package_manager")]
    pub program: String,

    /// Package manifest file name
    #[serde(default = "default_package_file")]
    pub manifest_file: String,

    /// Arguments for the install step
    #[serde(default = "default_install_args")]
    pub install_args: Vec<String>,

    /// Arguments for the build step
    #[serde(default = "default_build_args")]
    pub build_args: Vec<String>,

    /// Written to `scripts.build` when a project has none
    #[serde(default = "default_build_script")]
    pub default_build_script: String,

    /// Build output directory, relative to the project
    #[serde(default = "default_build_output_dir")]
    pub build_output_dir: String,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            program: default_package_manager(),
            manifest_file: default_package_file(),
            install_args: default_install_args(),
            build_args: default_build_args(),
            default_build_script: default_build_script(),
            build_output_dir: default_build_output_dir(),
        }
    }
}

/// Development watch server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DevServerConfig {
    /// Installed in order before the watcher starts
    #[serde(default = "default_core_dependencies")]
    pub core_dependencies: Vec<String>,

    /// Directory the watcher runs in, relative to the working directory
    #[serde(default = "default_dev_server_dir")]
    pub working_dir: String,

    /// Watcher executable
    #[serde(default = "default_dev_server_program")]
    pub program: String,

    /// Watcher arguments
    #[serde(default = "default_dev_server_args")]
    pub args: Vec<String>,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            core_dependencies: default_core_dependencies(),
            working_dir: default_dev_server_dir(),
            program: default_dev_server_program(),
            args: default_dev_server_args(),
        }
    }
}

/// Per-step time limits. `None` waits forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeoutsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_secs: Option<u64>,
}

impl TimeoutsConfig {
    pub fn clone(&self) -> Option<Duration> {
        self.clone_secs.map(Duration::from_secs)
    }

    pub fn install(&self) -> Option<Duration> {
        self.install_secs.map(Duration::from_secs)
    }

    pub fn build(&self) -> Option<Duration> {
        self.build_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    "https://github.com/phetsims".to_string()
}

fn default_dependencies_file() -> String {
    "dependencies.json".to_string()
}

fn default_mainline_branch() -> String {
    "main".to_string()
}

fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("perennial-alias".to_string(), "perennial".to_string())])
}

fn default_package_manager() -> String {
    "npm".to_string()
}

fn default_package_file() -> String {
    "package.json".to_string()
}

fn default_install_args() -> Vec<String> {
    vec!["install".to_string()]
}

fn default_build_args() -> Vec<String> {
    vec!["run".to_string(), "build".to_string()]
}

fn default_build_script() -> String {
    "grunt build".to_string()
}

fn default_build_output_dir() -> String {
    "build".to_string()
}

fn default_core_dependencies() -> Vec<String> {
    vec!["perennial-alias".to_string(), "chipper".to_string()]
}

fn default_dev_server_dir() -> String {
    "chipper".to_string()
}

fn default_dev_server_program() -> String {
    "node".to_string()
}

fn default_dev_server_args() -> Vec<String> {
    vec!["js/scripts/transpile.js".to_string(), "--watch".to_string()]
}
