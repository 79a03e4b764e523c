//! Action flows shared by the interactive menu and the subcommands
//!
//! Each flow runs one step, reports the outcome, and then asks whether to
//! chain into the next step. A failed step ends the flow; nothing after it
//! is offered.

use anyhow::Result;
use console::style;
use simforge_projects::{
    build_project, clone_project, resolve_dependencies, run_dev_server, CloneTarget, Error,
    ResolveReport, Workspace,
};

use crate::output;
use crate::prompt::{Choice, Prompter};

const PROMPT_INSTALL_DEPENDENCIES: &str = "Do you want to install dependencies?";
const PROMPT_RUN_DEV_SERVER: &str =
    "Do you want to run development server? This will install additional dependencies if needed.";
const PROMPT_CORE_DEPENDENCIES: &str =
    "This will install core dependencies, do you want to continue?";

pub struct Session<'a> {
    pub ws: &'a Workspace,
    pub prompter: &'a dyn Prompter,
}

impl<'a> Session<'a> {
    pub fn new(ws: &'a Workspace, prompter: &'a dyn Prompter) -> Self {
        Self { ws, prompter }
    }

    /// Clone `name`, then offer dependency preparation
    pub async fn download(&self, name: &str) -> Result<()> {
        let outcome = clone_project(self.ws, &CloneTarget::new(name.trim())).await?;

        if self.prompter.confirm(PROMPT_INSTALL_DEPENDENCIES)? {
            self.prepare(outcome.path().as_str()).await?;
        }
        Ok(())
    }

    /// Clone the dependencies of `dir`, then offer the dev server
    pub async fn prepare(&self, dir: &str) -> Result<()> {
        let report = resolve_dependencies(self.ws, dir).await?;
        print_tally(&report);

        if self.prompter.confirm(PROMPT_RUN_DEV_SERVER)? {
            self.start_dev_server().await?;
        }
        Ok(())
    }

    /// Ask before installing core dependencies, then run the dev server
    pub async fn confirm_dev_server(&self) -> Result<()> {
        if self.prompter.confirm(PROMPT_CORE_DEPENDENCIES)? {
            self.start_dev_server().await?;
        } else {
            output::info("Cancelled");
        }
        Ok(())
    }

    /// Install core dependencies and stay attached to the watcher
    pub async fn start_dev_server(&self) -> Result<()> {
        let outcome = run_dev_server(self.ws).await?;
        match outcome.code {
            Some(0) => output::info("Dev server exited with code 0"),
            Some(code) => output::warning(&format!("Dev server exited with code {}", code)),
            None => output::warning("Dev server terminated by signal"),
        }
        Ok(())
    }

    /// Install and build `project`, which must be a discovered project
    pub async fn build(&self, project: &str) -> Result<()> {
        let project = project.trim();
        let projects = self.candidates()?;
        if !projects.iter().any(|p| p == project) {
            return Err(Error::unknown_project(project, self.ws.root().as_str()).into());
        }

        let report = build_project(self.ws, project).await?;
        output::success("Build finished successfully");
        output::kv("Output", report.output_dir.as_str());
        Ok(())
    }

    /// Let the user pick one of the discovered projects
    pub fn choose_project(&self, prompt: &str) -> Result<String> {
        let projects = self.candidates()?;
        let choices: Vec<Choice> = projects.iter().map(Choice::new).collect();
        let index = self.prompter.select(prompt, &choices)?;
        Ok(projects[index].clone())
    }

    /// Discovered projects; an empty workspace is an error
    fn candidates(&self) -> Result<Vec<String>> {
        let projects = self.ws.discover_projects()?;
        if projects.is_empty() {
            return Err(Error::no_projects(self.ws.root().as_str()).into());
        }
        Ok(projects)
    }
}

fn print_tally(report: &ResolveReport) {
    println!(
        "{} {} success, {} fail",
        style("*** Cloning Finished ***").blue().bright(),
        style(report.succeeded()).green().bright(),
        style(report.failed()).red().bright()
    );
}
