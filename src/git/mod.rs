//! Git orchestration
//!
//! Thin wrappers that sequence `git` invocations through
//! [`ProcessRunner`](crate::external::ProcessRunner) and translate raw
//! execution failures into messages meant for students.

pub mod errors;
pub mod identity;
pub mod repository;
pub mod submission;
pub mod template;

pub use errors::{FetchError, SubmissionError};
pub use identity::{derive_overrides, ConfigOverride, ConfigProbe};
pub use repository::{GitHost, RepositoryError, RepositoryIdentifier, DEFAULT_HOST};
pub use submission::{SubmissionClient, SubmissionSession, COMMIT_MESSAGE};
pub use template::{template_files, TemplateFetcher};
