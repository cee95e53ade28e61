//! Runs the version-control executable and turns its exit status into a
//! typed result.

use super::command::{CommandError, CommandExecutor, ProcessCommandExecutor};
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_PROGRAM: &str = "git";

/// Raw failure of an external invocation.
///
/// Carries the full diagnostic for debug logging. Callers translate it into a
/// user-facing error before it reaches the terminal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("{program} is not installed")]
    NotInstalled { program: String },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatusText,
        stderr: String,
    },
    #[error("failed to run `{command}`: {message}")]
    Io { command: String, message: String },
}

impl ExecutionError {
    /// Exit code of a failed invocation, if the process exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionError::Failed {
                status: ExitStatusText(code),
                ..
            } => *code,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatusText(pub Option<i32>);

impl std::fmt::Display for ExitStatusText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(code) => write!(f, "status {code}"),
            None => write!(f, "a signal"),
        }
    }
}

/// Invokes one external program with argument lists.
#[derive(Clone)]
pub struct ProcessRunner {
    executor: Arc<dyn CommandExecutor>,
    program: String,
}

impl ProcessRunner {
    pub fn new(executor: Arc<dyn CommandExecutor>, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }

    /// Runner for the `git` found on `PATH`.
    pub fn git() -> Self {
        Self::new(Arc::new(ProcessCommandExecutor), DEFAULT_PROGRAM)
    }

    /// Run the program and return its captured stdout.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<u8>, ExecutionError> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let command = self.render(&args);
        tracing::trace!(command = %command, "running external command");

        let output = self
            .executor
            .execute(&self.program, &args)
            .map_err(|e| match e {
                CommandError::CommandNotFound { .. } => ExecutionError::NotInstalled {
                    program: self.program.clone(),
                },
                CommandError::Io { message } => ExecutionError::Io {
                    command: command.clone(),
                    message,
                },
            })?;

        if !output.success() {
            return Err(ExecutionError::Failed {
                command,
                status: ExitStatusText(output.status_code),
                stderr: output.stderr_text(),
            });
        }

        Ok(output.stdout)
    }

    /// Fails with [`ExecutionError::NotInstalled`] if the executable cannot be
    /// found. Any other outcome of `--version` is accepted.
    pub fn assert_installed(&self) -> Result<(), ExecutionError> {
        match self.run(&["--version"]) {
            Err(e @ ExecutionError::NotInstalled { .. }) => {
                tracing::debug!(error = %e, "executable lookup failed");
                Err(e)
            }
            _ => Ok(()),
        }
    }

    fn render(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRunner")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}
