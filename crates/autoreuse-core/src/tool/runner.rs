use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::ComplianceError;

/// What happens to a child's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collected into `ToolOutput::stdout`.
    Capture,
    /// Passed through to our own stdout, so the user sees it verbatim.
    Inherit,
    /// Sent to the null device.
    Discard,
}

/// A single external command, described independently of how it is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub output: OutputMode,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
            output: OutputMode::Capture,
        }
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Human-readable command line, used in logs and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status and captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Empty unless the invocation asked for `OutputMode::Capture`.
    pub stdout: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into `ComplianceError::ToolFailed`.
    pub fn check(self, invocation: &Invocation) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(ComplianceError::ToolFailed {
                command: invocation.command_line(),
                status: self.code,
            }
            .into())
        }
    }
}

/// Runs external commands and waits for them to exit.
///
/// Implementations never interpret the exit status; callers decide whether a
/// non-zero exit is fatal.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;
}

/// Spawns real processes with the repository root as working directory.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        tracing::debug!(command = %invocation.command_line(), "running");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&self.cwd)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(match invocation.output {
                OutputMode::Capture => Stdio::piped(),
                OutputMode::Inherit => Stdio::inherit(),
                OutputMode::Discard => Stdio::null(),
            });

        let output = command
            .output()
            .with_context(|| format!("failed to run `{}`", invocation.command_line()))?;

        let stdout = String::from_utf8(output.stdout).with_context(|| {
            format!(
                "`{}` produced output that is not valid UTF-8",
                invocation.command_line()
            )
        })?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout,
        })
    }
}
