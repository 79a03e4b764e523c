//! Command handlers

pub mod config;
pub mod doctor;
pub mod menu;
pub mod session;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use simforge_projects::Workspace;

use crate::cli::Commands;
use crate::prompt::Unattended;
use session::Session;

/// Run a non-interactive subcommand
pub async fn run(cmd: Commands, ws: &Workspace) -> Result<()> {
    match cmd {
        Commands::Download(args) => {
            let prompter = Unattended {
                assume_yes: args.yes,
            };
            Session::new(ws, &prompter).download(&args.name).await
        }
        Commands::Deps(args) => {
            let prompter = Unattended {
                assume_yes: args.yes,
            };
            Session::new(ws, &prompter).prepare(&args.dir).await
        }
        Commands::DevServer => {
            let prompter = Unattended { assume_yes: true };
            Session::new(ws, &prompter).start_dev_server().await
        }
        Commands::Build(args) => {
            let prompter = Unattended { assume_yes: false };
            Session::new(ws, &prompter).build(&args.project).await
        }
        Commands::Doctor => doctor::run(ws.config()),
        Commands::Config(cmd) => config::run(cmd, ws.config()),
    }
}
