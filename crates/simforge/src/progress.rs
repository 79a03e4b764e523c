//! Console rendering of orchestration progress

use camino::Utf8Path;
use console::style;
use indicatif::ProgressBar;
use simforge_projects::{CloneTarget, CommandSpec, Error, OutputLine, ProgressObserver};
use std::sync::Mutex;

use crate::output;

/// Prints tagged progress lines; clone and install steps get a spinner.
#[derive(Default)]
pub struct ConsoleObserver {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleObserver {
    fn start_spinner(&self, msg: &str) {
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(output::spinner(msg));
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressObserver for ConsoleObserver {
    fn on_clone_start(&self, target: &CloneTarget, _url: &str) {
        let msg = if target.is_aliased() {
            format!(
                "Cloning {} to {}",
                style(&target.source).blue(),
                style(&target.target).blue()
            )
        } else {
            format!("Cloning {}", style(&target.source).blue())
        };
        output::tagged("CLONE", &msg);
        self.start_spinner(&format!("git clone {}", target.source));
    }

    fn on_clone_skipped(&self, target: &CloneTarget, _path: &Utf8Path) {
        output::tagged(
            "CLONE",
            style(format!("Skipping {}, already exists", target.source)).yellow(),
        );
    }

    fn on_clone_finished(&self, target: &CloneTarget, path: &Utf8Path) {
        self.clear_spinner();
        output::tagged(
            "CLONE",
            style(format!("Cloned {} into {}", target.source, path)).green(),
        );
    }

    fn on_clone_failed(&self, target: &CloneTarget, error: &Error) {
        self.clear_spinner();
        output::tagged_err(
            "CLONE",
            format!(
                "{} {} {}",
                style("Error while cloning").red(),
                style(&target.target).blue(),
                style(error).dim()
            ),
        );
    }

    fn on_resolve_start(&self, count: usize) {
        println!(
            "{}",
            style(format!("*** Cloning {} Dependencies ***", count))
                .blue()
                .bright()
        );
    }

    fn on_install_start(&self, dir: &str) {
        output::tagged(
            "INSTALL",
            format!("Installing dependencies for {}", style(dir).blue()),
        );
        self.start_spinner("installing packages");
    }

    fn on_install_finished(&self, dir: &str) {
        self.clear_spinner();
        output::tagged(
            "INSTALL",
            style(format!("Dependencies installed for {}", dir)).green(),
        );
    }

    fn on_install_failed(&self, dir: &str, error: &Error) {
        self.clear_spinner();
        output::tagged_err(
            "INSTALL",
            format!(
                "{} {} {}",
                style("Error while installing dependencies").red(),
                style(dir).blue(),
                style(error).dim()
            ),
        );
    }

    fn on_build_start(&self, project: &str) {
        output::tagged("BUILD", format!("Building {}", style(project).blue()));
    }

    fn on_dev_server_start(&self, command: &CommandSpec) {
        let cwd = command.cwd.as_ref().map(|c| c.as_str()).unwrap_or(".");
        output::tagged(
            "DEV",
            format!("Running {} in {}", style(command).blue(), style(cwd).blue()),
        );
    }

    fn on_output(&self, line: &OutputLine) {
        match line {
            OutputLine::Stdout(text) => println!("{}", text),
            OutputLine::Stderr(text) => eprintln!("{}", text),
        }
    }
}
