//! `simforge config` command handlers

use anyhow::{Context, Result};
use simforge_core::SimforgeConfig;

use crate::cli::{ConfigCommands, ConfigShowArgs};

pub fn run(cmd: ConfigCommands, config: &SimforgeConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => show(args, config),
    }
}

fn show(args: ConfigShowArgs, config: &SimforgeConfig) -> Result<()> {
    let rendered = if args.json {
        serde_json::to_string_pretty(config).context("Failed to serialize config")?
    } else {
        serde_yaml_ng::to_string(config).context("Failed to serialize config")?
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
