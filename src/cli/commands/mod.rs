use crate::external::{ExecutionError, ProcessRunner};
use anyhow::Result;

pub mod submit;
pub mod template;

pub use submit::SubmitCommand;
pub use template::TemplateCommand;

pub trait Command {
    fn execute(&self) -> Result<()>;
}

pub const NOT_INSTALLED_MESSAGE: &str =
    "It looks like git is not installed. Please install git then try again.";

/// Failure shown to the user as-is, without the underlying cause.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UserFacingError(pub String);

pub fn ensure_git_installed(runner: &ProcessRunner) -> Result<()> {
    match runner.assert_installed() {
        Err(ExecutionError::NotInstalled { .. }) => {
            Err(UserFacingError(NOT_INSTALLED_MESSAGE.to_string()).into())
        }
        _ => Ok(()),
    }
}
