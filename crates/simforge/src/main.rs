//! simforge CLI - bootstrap, provision, and build multi-repository simulation projects
//!
//! This is the main entry point for the simforge command-line interface.

mod cli;
mod commands;
mod output;
mod progress;
mod prompt;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use console::{style, Term};
use simforge_core::ConfigLoader;
use simforge_projects::Workspace;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use commands::session::Session;
use progress::ConsoleObserver;
use prompt::{Cancelled, DialoguerPrompter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_cancellation(&e) => {
            println!("{}", style("Exit").red());
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::new()
        .and_then(|loader| loader.load_from(cli.config.as_deref()))
        .context("Failed to load configuration")?;

    let root = resolve_workdir(cli.workdir)?;
    let ws = Workspace::new(root, config).with_observer(Arc::new(ConsoleObserver::default()));

    match cli.command {
        Some(cmd) => commands::run(cmd, &ws).await,
        None => {
            if let Err(e) = Term::stdout().clear_screen() {
                debug!("Could not clear the terminal: {}", e);
            }
            let prompter = DialoguerPrompter;
            commands::menu::run(&Session::new(&ws, &prompter)).await
        }
    }
}

fn resolve_workdir(workdir: Option<Utf8PathBuf>) -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("Current directory is not valid UTF-8: {}", p.display()))?;

    let root = match workdir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    if !root.is_dir() {
        bail!("Working directory does not exist: {}", root);
    }
    Ok(root)
}

/// Prompt aborts (Esc, closed terminal) end the session quietly
fn is_cancellation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<Cancelled>().is_some() || e.downcast_ref::<dialoguer::Error>().is_some()
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr so they never interleave with menu output on stdout.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
