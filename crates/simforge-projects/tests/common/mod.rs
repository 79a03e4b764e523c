//! Common test helpers for simforge-projects integration tests
//!
//! Provides:
//! - A recording `CommandRunner` with scripted results
//! - A recording `ProgressObserver`
//! - Scratch workspace builders

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use simforge_core::SimforgeConfig;
use simforge_projects::{
    CloneTarget, CommandRunner, CommandSpec, Error, OutputLine, ProcessOutcome, ProgressObserver,
    Result, Workspace,
};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ─── Process Mock Infrastructure ─────────────────────────────────────────────

type Handler = Box<dyn Fn(&CommandSpec) -> Result<ProcessOutcome> + Send + Sync>;

/// Records every command and answers with a scripted outcome.
///
/// By default every command succeeds, and `git clone` creates its target
/// directory the way the real tool would.
pub struct FakeRunner {
    calls: Mutex<Vec<CommandSpec>>,
    handler: Handler,
    stream_lines: Vec<OutputLine>,
}

#[allow(dead_code)]
impl FakeRunner {
    pub fn new() -> Self {
        Self::with_handler(|_| Ok(exit(0)))
    }

    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> Result<ProcessOutcome> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
            stream_lines: Vec::new(),
        }
    }

    /// Lines replayed to the callback of every streamed command
    pub fn streaming(mut self, lines: Vec<OutputLine>) -> Self {
        self.stream_lines = lines;
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Commands rendered as `program arg arg`
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    fn answer(&self, spec: &CommandSpec) -> Result<ProcessOutcome> {
        self.calls.lock().unwrap().push(spec.clone());
        let outcome = (self.handler)(spec)?;
        let is_clone =
            spec.program == "git" && spec.args.first().map(String::as_str) == Some("clone");
        if outcome.success() && is_clone {
            if let Some(dest) = spec.args.last() {
                fs::create_dir_all(dest).unwrap();
            }
        }
        Ok(outcome)
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutcome> {
        self.answer(spec)
    }

    async fn stream(
        &self,
        spec: &CommandSpec,
        on_line: &(dyn Fn(OutputLine) + Send + Sync),
    ) -> Result<ProcessOutcome> {
        for line in &self.stream_lines {
            on_line(line.clone());
        }
        self.answer(spec)
    }
}

pub fn exit(code: i32) -> ProcessOutcome {
    ProcessOutcome {
        code: Some(code),
        stderr: if code == 0 {
            String::new()
        } else {
            "fatal: simulated failure".to_string()
        },
    }
}

#[allow(dead_code)]
pub fn spawn_failure() -> Error {
    Error::process_execution("simulated spawn failure")
}

// ─── Observer ────────────────────────────────────────────────────────────────

/// Records observer callbacks as short event strings
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_clone_start(&self, target: &CloneTarget, _url: &str) {
        self.push(format!("clone-start {}", target.target));
    }

    fn on_clone_skipped(&self, target: &CloneTarget, _path: &Utf8Path) {
        self.push(format!("clone-skipped {}", target.target));
    }

    fn on_clone_finished(&self, target: &CloneTarget, _path: &Utf8Path) {
        self.push(format!("clone-finished {}", target.target));
    }

    fn on_clone_failed(&self, target: &CloneTarget, _error: &Error) {
        self.push(format!("clone-failed {}", target.target));
    }

    fn on_install_start(&self, dir: &str) {
        self.push(format!("install-start {}", dir));
    }

    fn on_install_failed(&self, dir: &str, _error: &Error) {
        self.push(format!("install-failed {}", dir));
    }

    fn on_build_start(&self, project: &str) {
        self.push(format!("build-start {}", project));
    }

    fn on_output(&self, line: &OutputLine) {
        self.push(format!("output {}", line.text()));
    }
}

// ─── Workspace Fixtures ──────────────────────────────────────────────────────

/// A scratch working directory wired to fakes
pub struct TestWorkspace {
    _temp: TempDir,
    pub root: Utf8PathBuf,
    pub runner: Arc<FakeRunner>,
    pub observer: Arc<RecordingObserver>,
    pub ws: Workspace,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new(runner: FakeRunner) -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let runner = Arc::new(runner);
        let observer = Arc::new(RecordingObserver::default());
        let ws = Workspace::new(root.clone(), SimforgeConfig::default())
            .with_runner(runner.clone())
            .with_observer(observer.clone());

        Self {
            _temp: temp,
            root,
            runner,
            observer,
            ws,
        }
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> Utf8PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).unwrap()
    }

    /// A project directory holding a minimal package manifest
    pub fn npm_project(&self, name: &str) {
        self.write(&format!("{}/package.json", name), r#"{"name": "x"}"#);
    }
}
