//! Fakes shared by the command tests

use anyhow::Result;
use async_trait::async_trait;
use camino::Utf8PathBuf;
use simforge_core::SimforgeConfig;
use simforge_projects::{CommandRunner, CommandSpec, OutputLine, ProcessOutcome, Workspace};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::prompt::{Choice, Prompter};

/// Succeeds at everything; `git clone` creates its destination
#[derive(Default)]
pub struct OkRunner {
    calls: Mutex<Vec<String>>,
}

impl OkRunner {
    /// Commands rendered as `program args @ cwd`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, spec: &CommandSpec) -> simforge_projects::Result<ProcessOutcome> {
        let line = match &spec.cwd {
            Some(cwd) => format!("{} @ {}", spec, cwd),
            None => spec.to_string(),
        };
        self.calls.lock().unwrap().push(line);
        if spec.program == "git" {
            fs::create_dir_all(spec.args.last().unwrap()).unwrap();
        }
        Ok(ProcessOutcome {
            code: Some(0),
            stderr: String::new(),
        })
    }
}

#[async_trait]
impl CommandRunner for OkRunner {
    async fn run(&self, spec: &CommandSpec) -> simforge_projects::Result<ProcessOutcome> {
        self.record(spec)
    }

    async fn stream(
        &self,
        spec: &CommandSpec,
        _on_line: &(dyn Fn(OutputLine) + Send + Sync),
    ) -> simforge_projects::Result<ProcessOutcome> {
        self.record(spec)
    }
}

/// Replays scripted answers; running out of answers fails the test
#[derive(Default)]
pub struct Scripted {
    selections: RefCell<VecDeque<usize>>,
    inputs: RefCell<VecDeque<String>>,
    confirmations: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selects(self, indices: &[usize]) -> Self {
        self.selections.borrow_mut().extend(indices.iter().copied());
        self
    }

    pub fn inputs(self, answers: &[&str]) -> Self {
        self.inputs
            .borrow_mut()
            .extend(answers.iter().map(|a| a.to_string()));
        self
    }

    pub fn confirms(self, answers: &[bool]) -> Self {
        self.confirmations
            .borrow_mut()
            .extend(answers.iter().copied());
        self
    }

    /// Every prompt shown so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for Scripted {
    fn select(&self, prompt: &str, choices: &[Choice]) -> Result<usize> {
        self.asked.borrow_mut().push(prompt.to_string());
        let index = self
            .selections
            .borrow_mut()
            .pop_front()
            .expect("no scripted selection left");
        assert!(index < choices.len(), "selection out of range");
        Ok(index)
    }

    fn input(&self, prompt: &str) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self
            .inputs
            .borrow_mut()
            .pop_front()
            .expect("no scripted input left"))
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self
            .confirmations
            .borrow_mut()
            .pop_front()
            .expect("no scripted answer left"))
    }
}

/// Workspace on a tempdir, driven by an [`OkRunner`]
pub fn workspace() -> (TempDir, Arc<OkRunner>, Workspace) {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    let runner = Arc::new(OkRunner::default());
    let ws = Workspace::new(root, SimforgeConfig::default()).with_runner(runner.clone());
    (temp, runner, ws)
}
