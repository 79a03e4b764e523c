//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// simforge - download, prepare, and build multi-repository simulation projects
///
/// Run without a command for the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "simforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (default: ~/.simforge/config.yaml)
    #[arg(short, long, global = true, env = "SIMFORGE_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    /// Working directory projects are cloned into (default: current directory)
    #[arg(short = 'C', long, global = true)]
    pub workdir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone a project into the working directory
    Download(DownloadArgs),

    /// Clone the mainline dependencies of a project
    Deps(DepsArgs),

    /// Install core dependencies and run the development watch server
    DevServer,

    /// Install and build a project
    Build(BuildArgs),

    /// Check that required external tools are installed
    Doctor,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Repository name on the remote
    pub name: String,

    /// Also prepare dependencies and start the dev server
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Project directory, absolute or relative to the working directory
    pub dir: String,

    /// Start the dev server afterwards
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project directory name
    pub project: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
