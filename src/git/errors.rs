use crate::external::ExecutionError;
use thiserror::Error;

/// User-facing failures of [`TemplateFetcher`](super::TemplateFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to clone \"{remote}\".")]
    Clone {
        remote: String,
        #[source]
        source: ExecutionError,
    },
    #[error("Failed to create a temporary directory.")]
    TempDir(#[source] std::io::Error),
}

/// User-facing failures of [`SubmissionClient`](super::SubmissionClient) and
/// [`SubmissionSession`](super::SubmissionSession).
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(
        "Failed to clone \"{remote}\".\nPlease make sure you accepted the assignment invite on the problem set page."
    )]
    Clone {
        remote: String,
        #[source]
        source: ExecutionError,
    },
    #[error("Failed to ready files for submission.")]
    Stage(#[source] ExecutionError),
    #[error("Failed to submit.")]
    Submit(#[source] ExecutionError),
    #[error("Failed to create a temporary directory.")]
    TempDir(#[source] std::io::Error),
}
