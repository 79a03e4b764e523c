//! Package manager steps: install and build

use crate::error::{Error, Result};
use crate::process::CommandSpec;
use crate::workspace::Workspace;
use camino::Utf8PathBuf;
use simforge_core::PackageManifest;
use tracing::{debug, info};

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub project_dir: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    /// The default build script was written into the package manifest
    pub script_synthesized: bool,
}

/// Run the package manager's install step in `dir`
///
/// Output is captured, not streamed.
///
/// # Errors
/// Returns error if:
/// - The directory does not exist or is not a directory
/// - The directory has no package manifest
/// - The install cannot be started, exits non-zero, or times out
pub async fn install_packages(ws: &Workspace, dir: &str) -> Result<()> {
    let target = ws.existing_dir(dir)?;
    let pm = &ws.config().package_manager;

    if !target.join(&pm.manifest_file).is_file() {
        return Err(
            simforge_core::Error::manifest_not_found(&pm.manifest_file, target.as_str()).into(),
        );
    }

    ws.observer().on_install_start(dir);
    let spec = CommandSpec::new(&pm.program)
        .args(&pm.install_args)
        .current_dir(&target)
        .timeout(ws.config().timeouts.install());

    let result = match ws.runner().run(&spec).await {
        Ok(outcome) if outcome.success() => Ok(()),
        Ok(outcome) => {
            if !outcome.stderr.is_empty() {
                debug!("{} stderr: {}", spec, outcome.stderr);
            }
            Err(Error::install_failed(dir, outcome.code))
        }
        Err(e) => Err(e),
    };

    match &result {
        Ok(()) => ws.observer().on_install_finished(dir),
        Err(e) => ws.observer().on_install_failed(dir, e),
    }
    result
}

/// Build the project in `project`
///
/// Ensures the package manifest has a build script, installs packages, then
/// runs the build with its output streamed to the observer.
///
/// # Errors
/// Returns error if the manifest is missing, unparsable, or empty, if the
/// install fails (the build is then never started), or if the build exits
/// non-zero.
pub async fn build_project(ws: &Workspace, project: &str) -> Result<BuildReport> {
    let project_dir = ws.existing_dir(project)?;
    let pm = &ws.config().package_manager;

    let mut manifest = PackageManifest::load(&project_dir, &pm.manifest_file)?;
    let script_synthesized = manifest.ensure_build_script(&pm.default_build_script)?;
    if script_synthesized {
        info!(
            "Adding build script '{}' to {}",
            pm.default_build_script,
            manifest.path()
        );
        manifest.save()?;
    }

    install_packages(ws, project_dir.as_str()).await?;

    ws.observer().on_build_start(project);
    let spec = CommandSpec::new(&pm.program)
        .args(&pm.build_args)
        .current_dir(&project_dir)
        .timeout(ws.config().timeouts.build());

    let observer = ws.observer();
    let outcome = ws
        .runner()
        .stream(&spec, &|line| observer.on_output(&line))
        .await?;

    if !outcome.success() {
        return Err(Error::build_failed(project, outcome.code));
    }

    Ok(BuildReport {
        output_dir: project_dir.join(&pm.build_output_dir),
        project_dir,
        script_synthesized,
    })
}
