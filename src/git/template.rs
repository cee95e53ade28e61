//! Shallow clones of read-only assignment templates.

use super::errors::FetchError;
use super::repository::RepositoryIdentifier;
use crate::external::ProcessRunner;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub struct TemplateFetcher {
    runner: ProcessRunner,
}

impl TemplateFetcher {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }

    /// Clone the template into a fresh temporary directory.
    ///
    /// The directory is removed when the returned [`TempDir`] is dropped. On
    /// failure it has already been removed by the time this returns.
    pub fn fetch_template(&self, repository: &RepositoryIdentifier) -> Result<TempDir, FetchError> {
        let remote = repository.remote_url();
        let _span = tracing::info_span!("fetch_template", remote = %remote).entered();

        let dir = tempfile::Builder::new()
            .prefix("submit50-template-")
            .tempdir()
            .map_err(FetchError::TempDir)?;

        let target = dir.path().to_string_lossy().into_owned();
        if let Err(e) = self
            .runner
            .run(&["clone", "--depth", "1", "--quiet", remote.as_str(), target.as_str()])
        {
            tracing::debug!(error = %e, "template clone failed");
            return Err(FetchError::Clone { remote, source: e });
        }

        tracing::debug!(path = %dir.path().display(), "template cloned");
        Ok(dir)
    }
}

/// Files in a checked-out template, relative to `root`, excluding `.git`.
pub fn template_files(root: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
