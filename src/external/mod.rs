//! External tool abstractions
//!
//! Every call into the version-control executable goes through
//! [`CommandExecutor`], so the git layer can be exercised in tests without
//! spawning processes.

pub mod command;
pub mod runner;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use runner::{ExecutionError, ProcessRunner};
