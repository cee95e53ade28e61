//! Base command execution abstraction
//!
//! Provides the foundational trait for executing external commands, enabling
//! dependency injection for testing.

use thiserror::Error;

#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub status_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim_end().to_string()
    }
}

#[derive(Debug, Error, Clone)]
pub enum CommandError {
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },
    #[error("IO error: {message}")]
    Io { message: String },
}

/// Trait for executing external commands
///
/// Implementations block until the child exits. There is no timeout and no
/// retry; a non-zero exit is reported through [`CommandOutput`], not as an
/// error.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError>;
}

/// Real implementation using std::process::Command
pub struct ProcessCommandExecutor;

impl CommandExecutor for ProcessCommandExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        use std::process::Command;

        let output = Command::new(program).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CommandError::CommandNotFound {
                    command: program.to_string(),
                }
            } else {
                CommandError::Io {
                    message: e.to_string(),
                }
            }
        })?;

        Ok(CommandOutput {
            status_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    #[cfg(unix)]
    fn test_process_command_executor_success() {
        let executor = ProcessCommandExecutor;
        let output = executor.execute("echo", &args(&["hello"])).unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, b"hello\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_process_command_executor_reports_exit_status() {
        let executor = ProcessCommandExecutor;
        let output = executor
            .execute("sh", &args(&["-c", "echo oops >&2; exit 3"]))
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.status_code, Some(3));
        assert_eq!(output.stderr_text(), "oops");
    }

    #[test]
    fn test_process_command_executor_command_not_found() {
        let executor = ProcessCommandExecutor;
        let result = executor.execute("nonexistent_command_xyz", &[]);

        assert!(matches!(result, Err(CommandError::CommandNotFound { .. })));
    }
}
