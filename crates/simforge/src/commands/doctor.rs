//! Doctor command - check that the external tools simforge drives are installed

use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use simforge_core::SimforgeConfig;

/// Tools the configuration refers to, with what they are needed for
fn required_tools(config: &SimforgeConfig) -> Vec<(&str, &'static str)> {
    let mut tools = vec![
        ("git", "download and dependency preparation"),
        (
            config.package_manager.program.as_str(),
            "install and build",
        ),
    ];
    if !tools.iter().any(|(name, _)| *name == config.dev_server.program) {
        tools.push((config.dev_server.program.as_str(), "development server"));
    }
    tools
}

/// Report each required tool as found or missing
pub fn run(config: &SimforgeConfig) -> Result<()> {
    println!("{}", "System Check".bold());
    println!("{}", "─".repeat(40));

    let mut missing = 0;
    for (tool, purpose) in required_tools(config) {
        match which::which(tool) {
            Ok(path) => println!(
                "{} {} {}",
                "✓".green(),
                tool.bold(),
                format!("({})", path.display()).dimmed()
            ),
            Err(_) => {
                missing += 1;
                println!(
                    "{} {} {}",
                    "✗".red(),
                    tool.bold(),
                    format!("not found, needed for {}", purpose).red()
                );
            }
        }
    }

    if missing > 0 {
        return Err(anyhow!("{} required tool(s) missing", missing));
    }
    Ok(())
}
