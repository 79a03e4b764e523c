//! Child process execution
//!
//! Every external tool (`git`, the package manager, the watch server) is
//! started through a [`CommandRunner`]. [`SystemRunner`] spawns real
//! processes with tokio; tests substitute a recording fake.

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

/// A command to run: program, arguments, working directory, time limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<Utf8PathBuf>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a finished process exited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured stderr (empty for streamed runs)
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// One line of streamed process output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    pub fn text(&self) -> &str {
        match self {
            Self::Stdout(line) | Self::Stderr(line) => line,
        }
    }
}

/// Executes external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion, capturing output
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutcome>;

    /// Run to completion, handing each output line to `on_line` as it arrives
    async fn stream(
        &self,
        spec: &CommandSpec,
        on_line: &(dyn Fn(OutputLine) + Send + Sync),
    ) -> Result<ProcessOutcome>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

fn spawn_error(spec: &CommandSpec, e: std::io::Error) -> Error {
    Error::process_execution(format!("{}: {}", spec.program, e))
}

fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<OutputLine>, wrap: fn(String) -> OutputLine)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(wrap(line)).is_err() {
                break;
            }
        }
    });
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutcome> {
        debug!("Running: {}", spec);
        let mut cmd = spec.to_command();
        let output = cmd.output();

        let output = match spec.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| Error::timeout(spec.to_string(), limit.as_secs()))?,
            None => output.await,
        }
        .map_err(|e| spawn_error(spec, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{}: {}", spec.program, stdout.trim_end());
        }

        Ok(ProcessOutcome {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    async fn stream(
        &self,
        spec: &CommandSpec,
        on_line: &(dyn Fn(OutputLine) + Send + Sync),
    ) -> Result<ProcessOutcome> {
        debug!("Streaming: {}", spec);
        let mut cmd = spec.to_command();
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| spawn_error(spec, e))?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            forward_lines(stdout, tx.clone(), OutputLine::Stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            forward_lines(stderr, tx.clone(), OutputLine::Stderr);
        }
        drop(tx);

        let pump = async {
            while let Some(line) = rx.recv().await {
                on_line(line);
            }
            child.wait().await
        };

        // The child is killed on drop if the limit is hit.
        let status = match spec.timeout {
            Some(limit) => tokio::time::timeout(limit, pump)
                .await
                .map_err(|_| Error::timeout(spec.to_string(), limit.as_secs()))?,
            None => pump.await,
        }
        .map_err(|e| spawn_error(spec, e))?;

        Ok(ProcessOutcome {
            code: status.code(),
            stderr: String::new(),
        })
    }
}
