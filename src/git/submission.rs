//! Packaging a student's work tree into a commit on their assignment
//! repository.
//!
//! The flow is always the same: [`SubmissionClient::clone_bare`] fetches the
//! repository's history into a temporary metadata directory, then the returned
//! [`SubmissionSession`] stages the caller's work tree against it, commits and
//! pushes. The session owns the temporary directory, so the metadata directory
//! is bound exactly once and removed when the session goes away.

use super::errors::SubmissionError;
use super::identity::{derive_overrides, ConfigOverride};
use super::repository::RepositoryIdentifier;
use crate::external::runner::ExitStatusText;
use crate::external::{ExecutionError, ProcessRunner};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const COMMIT_MESSAGE: &str = "Automated commit by submit50";
pub const REMOTE_NAME: &str = "origin";

pub struct SubmissionClient {
    identity: String,
    repository: RepositoryIdentifier,
    runner: ProcessRunner,
    work_tree: PathBuf,
    overrides: Vec<ConfigOverride>,
}

impl SubmissionClient {
    /// Queries git configuration once to derive identity and credential
    /// overrides for this client.
    pub fn new(
        identity: impl Into<String>,
        repository: RepositoryIdentifier,
        runner: ProcessRunner,
        work_tree: impl Into<PathBuf>,
    ) -> Self {
        let identity = identity.into();
        let overrides = derive_overrides(&runner, &identity, repository.host());
        tracing::debug!(
            identity = %identity,
            overrides = overrides.len(),
            "derived git config overrides"
        );
        Self::with_overrides(identity, repository, runner, work_tree, overrides)
    }

    /// Build a client with precomputed overrides, skipping the config queries.
    pub fn with_overrides(
        identity: impl Into<String>,
        repository: RepositoryIdentifier,
        runner: ProcessRunner,
        work_tree: impl Into<PathBuf>,
        overrides: Vec<ConfigOverride>,
    ) -> Self {
        Self {
            identity: identity.into(),
            repository,
            runner,
            work_tree: work_tree.into(),
            overrides,
        }
    }

    pub fn repository(&self) -> &RepositoryIdentifier {
        &self.repository
    }

    pub fn overrides(&self) -> &[ConfigOverride] {
        &self.overrides
    }

    /// Bare, quiet clone of the student repository into a temporary directory
    /// that becomes the metadata directory for every later invocation.
    pub fn clone_bare(self) -> Result<SubmissionSession, SubmissionError> {
        let remote = self.repository.remote_url();
        let _span = tracing::info_span!("clone_bare", remote = %remote).entered();

        let git_dir = tempfile::Builder::new()
            .prefix("submit50-")
            .tempdir()
            .map_err(SubmissionError::TempDir)?;

        let target = git_dir.path().to_string_lossy().into_owned();
        if let Err(e) = self.git(None, &["clone", "--bare", "--quiet", remote.as_str(), target.as_str()]) {
            tracing::debug!(error = %e, "bare clone failed");
            return Err(SubmissionError::Clone { remote, source: e });
        }

        tracing::debug!(git_dir = %git_dir.path().display(), "bare clone bound");
        Ok(SubmissionSession {
            client: self,
            git_dir,
        })
    }

    /// `[--git-dir <dir>] --work-tree <cwd> [-c k=v ...] <args>`
    fn command_line(&self, git_dir: Option<&Path>, args: &[&str]) -> Vec<String> {
        let mut line = Vec::with_capacity(args.len() + 4 + self.overrides.len() * 2);
        if let Some(dir) = git_dir {
            line.push("--git-dir".to_string());
            line.push(dir.to_string_lossy().into_owned());
        }
        line.push("--work-tree".to_string());
        line.push(self.work_tree.to_string_lossy().into_owned());
        line.extend(self.overrides.iter().flat_map(ConfigOverride::to_args));
        line.extend(args.iter().map(|a| a.to_string()));
        line
    }

    fn git(&self, git_dir: Option<&Path>, args: &[&str]) -> Result<Vec<u8>, ExecutionError> {
        self.runner.run(&self.command_line(git_dir, args))
    }
}

/// A [`SubmissionClient`] bound to its bare clone.
pub struct SubmissionSession {
    client: SubmissionClient,
    git_dir: TempDir,
}

impl SubmissionSession {
    pub fn git_dir(&self) -> &Path {
        self.git_dir.path()
    }

    pub fn client(&self) -> &SubmissionClient {
        &self.client
    }

    /// Stage everything in the work tree and return the tracked paths in
    /// ascending byte order.
    pub fn stage_all(&self) -> Result<Vec<PathBuf>, SubmissionError> {
        let _span = tracing::info_span!("stage_all").entered();
        self.add_and_list().map_err(|e| {
            tracing::debug!(error = %e, "staging failed");
            SubmissionError::Stage(e)
        })
    }

    /// Commit (empty commits allowed) and push the current branch to
    /// `origin`. A commit that was created before a failed push is kept.
    pub fn commit_and_push(&self) -> Result<(), SubmissionError> {
        let _span = tracing::info_span!("commit_and_push").entered();
        self.commit_then_push().map_err(|e| {
            tracing::debug!(error = %e, "submission failed");
            SubmissionError::Submit(e)
        })
    }

    /// Remove the metadata directory now, reporting any I/O error.
    pub fn close(self) -> std::io::Result<()> {
        self.git_dir.close()
    }

    fn add_and_list(&self) -> Result<Vec<PathBuf>, ExecutionError> {
        self.git(&["add", "--all"])?;
        let listing = self.git(&["ls-files", "-z"])?;
        Ok(parse_file_list(&listing))
    }

    fn commit_then_push(&self) -> Result<(), ExecutionError> {
        self.git(&["commit", "--allow-empty", "--message", COMMIT_MESSAGE])?;
        let branch = self.current_branch()?;
        tracing::debug!(branch = %branch, "pushing");
        self.git(&["push", "--quiet", REMOTE_NAME, branch.as_str()])?;
        Ok(())
    }

    fn current_branch(&self) -> Result<String, ExecutionError> {
        let line = self.client.command_line(Some(self.git_dir()), &["branch", "--show-current"]);
        let stdout = self.client.runner.run(&line)?;
        let branch = String::from_utf8_lossy(&stdout).trim_end().to_string();
        if branch.is_empty() {
            // Detached HEAD: nothing sensible to push.
            return Err(ExecutionError::Failed {
                command: line.join(" "),
                status: ExitStatusText(Some(0)),
                stderr: "no current branch".to_string(),
            });
        }
        Ok(branch)
    }

    fn git(&self, args: &[&str]) -> Result<Vec<u8>, ExecutionError> {
        self.client.git(Some(self.git_dir.path()), args)
    }
}

/// NUL-separated `ls-files -z` output, ordered by the raw path bytes.
///
/// Sorting happens before conversion: `PathBuf` ordering is per component and
/// would disagree with byte order for names like `a-b` and `a/b`.
fn parse_file_list(listing: &[u8]) -> Vec<PathBuf> {
    let mut entries: Vec<&[u8]> = listing
        .split(|b| *b == 0)
        .filter(|entry| !entry.is_empty())
        .collect();
    entries.sort_unstable();
    entries.into_iter().map(path_from_bytes).collect()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

// git on Windows emits UTF-8 paths.
#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
