//! Development watch server
//!
//! The watcher needs the core infrastructure packages installed first. Once
//! started it runs until it exits on its own or the session is interrupted.

use crate::error::{Error, Result};
use crate::package::install_packages;
use crate::process::{CommandSpec, ProcessOutcome};
use crate::workspace::Workspace;
use tracing::info;

/// Install the configured core dependencies, in order
///
/// Stops at the first failure.
pub async fn install_core_dependencies(ws: &Workspace) -> Result<()> {
    for name in &ws.config().dev_server.core_dependencies {
        install_packages(ws, name)
            .await
            .map_err(|e| Error::core_dependency_failed(name, e))?;
    }
    Ok(())
}

/// Install core dependencies, then run the watch server until it exits
///
/// Output is streamed to the observer. No time limit is applied.
pub async fn run_dev_server(ws: &Workspace) -> Result<ProcessOutcome> {
    install_core_dependencies(ws).await?;

    let dev = &ws.config().dev_server;
    let spec = CommandSpec::new(&dev.program)
        .args(&dev.args)
        .current_dir(ws.root().join(&dev.working_dir));

    info!("Starting dev server: {}", spec);
    ws.observer().on_dev_server_start(&spec);

    let observer = ws.observer();
    let outcome = ws
        .runner()
        .stream(&spec, &|line| observer.on_output(&line))
        .await?;

    info!("Dev server exited with {:?}", outcome.code);
    Ok(outcome)
}
