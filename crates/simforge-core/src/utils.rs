//! Shared utility functions for simforge crates

use anyhow::anyhow;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so container
/// setups that remap HOME are respected.
pub fn get_home_dir() -> anyhow::Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Resolve a user-supplied directory against the working directory.
///
/// Absolute inputs are taken as-is.
pub fn resolve_dir(workdir: &Utf8Path, input: &str) -> Utf8PathBuf {
    let candidate = Utf8Path::new(input);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        workdir.join(candidate)
    }
}
