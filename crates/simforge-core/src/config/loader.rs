//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.simforge/config.yaml, or an explicit file)
//! 3. Environment variables (SIMFORGE_* prefix)
//! 4. CLI flags (handled by caller)

use crate::config::types::{SimforgeConfig, TimeoutsConfig};
use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "defaults.yaml";
const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Directory holding the user config file
    config_dir: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at ~/.simforge
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_dir: Self::default_config_dir()?,
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    fn default_config_dir() -> Result<Utf8PathBuf> {
        let home = get_home_dir()
            .map_err(|_| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {:?}", p)))?;
        Ok(home.join(".simforge"))
    }

    /// Load configuration using the user config file if present
    pub fn load(&self) -> Result<SimforgeConfig> {
        self.load_from(None)
    }

    /// Load configuration, replacing the user config file with `explicit`.
    ///
    /// An explicit file must exist; the implicit one is optional.
    pub fn load_from(&self, explicit: Option<&Utf8Path>) -> Result<SimforgeConfig> {
        let mut config = Self::load_embedded_config::<SimforgeConfig>(DEFAULTS_FILE)?;

        let overlay_path = match explicit {
            Some(path) if !path.exists() => return Err(Error::config_not_found(path.as_str())),
            Some(path) => Some(path.to_path_buf()),
            None => {
                let path = self.config_dir.join(USER_CONFIG_FILE);
                path.exists().then_some(path)
            }
        };

        if let Some(path) = overlay_path {
            debug!("Loading config overlay from {}", path);
            let overlay = Self::load_yaml_file::<SimforgeConfig>(&path)?;
            config = Self::merge_config(config, overlay);
        }

        Self::apply_env_overrides(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    fn load_yaml_file<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge two configs; sections of `overlay` replace those of `base`,
    /// except aliases (merged key by key) and timeouts (set values win).
    fn merge_config(base: SimforgeConfig, overlay: SimforgeConfig) -> SimforgeConfig {
        let mut dependencies = overlay.dependencies;
        let mut aliases = base.dependencies.aliases;
        aliases.extend(dependencies.aliases);
        dependencies.aliases = aliases;

        SimforgeConfig {
            remote: overlay.remote,
            dependencies,
            package_manager: overlay.package_manager,
            dev_server: overlay.dev_server,
            timeouts: TimeoutsConfig {
                clone_secs: overlay.timeouts.clone_secs.or(base.timeouts.clone_secs),
                install_secs: overlay.timeouts.install_secs.or(base.timeouts.install_secs),
                build_secs: overlay.timeouts.build_secs.or(base.timeouts.build_secs),
            },
        }
    }

    fn apply_env_overrides(mut config: SimforgeConfig) -> Result<SimforgeConfig> {
        if let Ok(val) = env::var("SIMFORGE_REMOTE_BASE_URL") {
            config.remote.base_url = val;
        }

        if let Ok(val) = env::var("SIMFORGE_MAINLINE_BRANCH") {
            config.dependencies.mainline_branch = val;
        }

        if let Ok(val) = env::var("SIMFORGE_PACKAGE_MANAGER") {
            config.package_manager.program = val;
        }

        if let Ok(val) = env::var("SIMFORGE_DEFAULT_BUILD_SCRIPT") {
            config.package_manager.default_build_script = val;
        }

        if let Some(secs) = Self::env_secs("SIMFORGE_CLONE_TIMEOUT_SECS")? {
            config.timeouts.clone_secs = Some(secs);
        }

        if let Some(secs) = Self::env_secs("SIMFORGE_INSTALL_TIMEOUT_SECS")? {
            config.timeouts.install_secs = Some(secs);
        }

        if let Some(secs) = Self::env_secs("SIMFORGE_BUILD_TIMEOUT_SECS")? {
            config.timeouts.build_secs = Some(secs);
        }

        Ok(config)
    }

    fn env_secs(name: &str) -> Result<Option<u64>> {
        match env::var(name) {
            Ok(val) => val
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_config(format!("{} must be a valid number", name))),
            Err(_) => Ok(None),
        }
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
