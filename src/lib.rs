// submit50-classroom library - git orchestration for assignment submission
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod external;
pub mod git;
pub mod telemetry;

// Re-export key types for easy access
pub use config::SubmitConfig;
pub use external::{CommandExecutor, ExecutionError, ProcessCommandExecutor, ProcessRunner};
pub use git::{
    FetchError, GitHost, RepositoryIdentifier, SubmissionClient, SubmissionError, SubmissionSession,
    TemplateFetcher,
};
pub use telemetry::init_telemetry;
