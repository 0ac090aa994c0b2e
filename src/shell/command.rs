//! Subprocess execution.
//!
//! Every external tool the engine touches (installer, manifest generator,
//! registry query, git) goes through [`CommandSpec`]. Commands run on tokio
//! with stdin/stdout/stderr detached unless output is captured explicitly.
//! Synchronous callers drive them with [`block_on`], which uses a
//! single-threaded runtime: the only parallelism is between the child
//! processes themselves.

use crate::error::{Result, SyncError};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};

/// Description of a subprocess to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute (looked up on PATH).
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,

    /// Working directory.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Human-readable command line for logs and errors.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        // A dropped, unfinished run never leaves its child behind.
        cmd.kill_on_drop(true);
        cmd
    }
}

/// Result of executing a subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or by the timeout).
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed for exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a result from an exit code.
    pub fn exited(exit_code: Option<i32>, duration: Duration) -> Self {
        Self {
            exit_code,
            duration,
            success: exit_code == Some(0),
            timed_out: false,
        }
    }

    /// Create a result for a command killed by its timeout.
    pub fn timed_out(duration: Duration) -> Self {
        Self {
            exit_code: None,
            duration,
            success: false,
            timed_out: true,
        }
    }
}

fn launch_error(spec: &CommandSpec, source: std::io::Error) -> SyncError {
    SyncError::CommandLaunch {
        command: spec.display(),
        source,
    }
}

/// Kill `child` and reap it. The child may already have exited.
async fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "kill failed");
    }
}

/// Run a subprocess quietly until it exits or `timeout` elapses.
///
/// A child still running at the deadline is killed and reaped, and the
/// result reports `timed_out`. `None` waits indefinitely.
pub async fn run(spec: &CommandSpec, timeout: Option<Duration>) -> Result<CommandResult> {
    let command = spec.display();
    tracing::debug!(%command, "spawning");

    let started = Instant::now();
    let mut child = spec
        .to_command()
        .spawn()
        .map_err(|source| launch_error(spec, source))?;

    let status = match timeout {
        None => child.wait().await,
        Some(limit) => {
            let waited = tokio::time::timeout(limit, child.wait()).await;
            match waited {
                Ok(status) => status,
                Err(_) => {
                    tracing::warn!(%command, ?limit, "killing timed out command");
                    kill_and_reap(&mut child).await;
                    return Ok(CommandResult::timed_out(started.elapsed()));
                }
            }
        }
    };

    match status {
        Ok(status) => Ok(CommandResult::exited(status.code(), started.elapsed())),
        Err(source) => {
            kill_and_reap(&mut child).await;
            Err(launch_error(spec, source))
        }
    }
}

/// Run a subprocess with stdout piped and collect its output.
///
/// `Ok(None)` means `timeout` elapsed and the child was killed. The raw IO
/// error and exit status are left to the caller.
pub async fn capture(
    spec: &CommandSpec,
    timeout: Option<Duration>,
) -> std::io::Result<Option<Output>> {
    let mut cmd = spec.to_command();
    cmd.stdout(Stdio::piped());
    let output = cmd.spawn()?.wait_with_output();

    match timeout {
        None => output.await.map(Some),
        // Dropping the unfinished future kills the child.
        Some(limit) => match tokio::time::timeout(limit, output).await {
            Ok(output) => output.map(Some),
            Err(_) => {
                tracing::warn!(command = %spec.display(), ?limit, "killed timed out command");
                Ok(None)
            }
        },
    }
}

/// Drive `future` to completion on a fresh single-threaded runtime.
///
/// Must not be called from inside another tokio runtime.
pub fn block_on<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Blocking form of [`run`].
pub fn execute(spec: &CommandSpec, timeout: Option<Duration>) -> Result<CommandResult> {
    block_on(run(spec, timeout))?
}
