//! External command execution with timeouts
//!
//! The package manager and git are invoked as opaque subprocesses: the only
//! things the pipeline observes are the exit status, captured output and
//! whether the command finished within its time limit.

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// A program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Why an external command did not succeed
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Program could not be started (usually not installed)
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Program exceeded its time limit and was killed
    #[error("`{command}` timed out after {} seconds", .limit.as_secs())]
    Timeout { command: String, limit: Duration },

    /// Program exited unsuccessfully
    #[error("`{command}` failed with exit code {code}{}", stderr_suffix(.stderr))]
    Exit {
        command: String,
        code: i32,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let last = stderr.lines().rev().find(|l| !l.trim().is_empty());
    match last {
        Some(line) => format!(": {}", line.trim()),
        None => String::new(),
    }
}

/// Runs external commands; replaced by a scripted runner in tests
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        invocation: &Invocation,
        cwd: &Path,
        limit: Duration,
    ) -> Result<CommandOutput, ProcessError>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        cwd: &Path,
        limit: Duration,
    ) -> Result<CommandOutput, ProcessError> {
        let command = invocation.to_string();
        tracing::debug!(%command, cwd = %cwd.display(), "spawning");

        // kill_on_drop kills the child when the timeout drops the wait future
        let child = TokioCommand::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                command: command.clone(),
                source,
            })?;

        let output = match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => return Err(ProcessError::Spawn { command, source }),
            Err(_) => return Err(ProcessError::Timeout { command, limit }),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            Err(ProcessError::Exit {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr,
            })
        }
    }
}

/// How a scripted command fails
#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    /// Behaves like a program that is not installed
    Missing,
    /// Exits with the code and stderr
    Exit(i32, String),
    /// Never finishes within its limit
    Timeout,
}

/// Records invocations and fails the ones matching a scripted prefix
///
/// Used by embedding callers and tests instead of spawning real processes.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    failures: Vec<(String, ScriptedFailure)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose rendered form starts with `prefix`
    pub fn fail_on(mut self, prefix: impl Into<String>, failure: ScriptedFailure) -> Self {
        self.failures.push((prefix.into(), failure));
        self
    }

    /// Rendered commands in the order they were run
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        _cwd: &Path,
        limit: Duration,
    ) -> Result<CommandOutput, ProcessError> {
        let command = invocation.to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        let failure = self
            .failures
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, failure)| failure.clone());

        match failure {
            None => Ok(CommandOutput::default()),
            Some(ScriptedFailure::Missing) => Err(ProcessError::Spawn {
                command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            }),
            Some(ScriptedFailure::Exit(code, stderr)) => Err(ProcessError::Exit {
                command,
                code,
                stderr,
            }),
            Some(ScriptedFailure::Timeout) => Err(ProcessError::Timeout { command, limit }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("git", ["commit", "-m", "Initial commit"]);
        assert_eq!(inv.to_string(), "git commit -m \"Initial commit\"");
    }

    #[test]
    fn test_exit_error_shows_last_stderr_line() {
        let err = ProcessError::Exit {
            command: "npm install".to_string(),
            code: 1,
            stderr: "npm ERR! network\nnpm ERR! ETIMEDOUT\n\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`npm install` failed with exit code 1: npm ERR! ETIMEDOUT"
        );
    }

    #[test]
    fn test_timeout_message() {
        let err = ProcessError::Timeout {
            command: "npm install".to_string(),
            limit: Duration::from_secs(300),
        };
        assert!(err.to_string().contains("300 seconds"));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = std::env::temp_dir();
        let result = SystemRunner
            .run(
                &Invocation::new("corestack-definitely-missing-binary", ["--version"]),
                &dir,
                Duration::from_secs(5),
            )
            .await;
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_scripted_runner_fails_matching_prefix() {
        let runner = ScriptedRunner::new()
            .fail_on("npm install", ScriptedFailure::Exit(1, "boom".to_string()));
        let cwd = std::env::temp_dir();
        let limit = Duration::from_secs(1);

        assert!(runner
            .run(&Invocation::new("git", ["init"]), &cwd, limit)
            .await
            .is_ok());
        let err = runner
            .run(&Invocation::new("npm", ["install"]), &cwd, limit)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(runner.calls(), vec!["git init", "npm install"]);
    }
}
