//! Local remotes for integration tests, served over file:// from a temporary directory

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use submit50_classroom::GitHost;
use tempfile::TempDir;

pub struct RemoteFixture {
    root: TempDir,
}

impl RemoteFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            root: tempfile::tempdir()?,
        })
    }

    /// Host prefix pointing at the fixture root, e.g. `file:///tmp/.tmpXYZ/`
    pub fn host(&self) -> GitHost {
        GitHost::new(format!("file://{}/", self.root.path().display()))
    }

    pub fn bare_path(&self, repository: &str) -> PathBuf {
        self.root.path().join(repository)
    }

    /// Create a bare repository at `repository` whose `main` branch holds `files`.
    pub fn create_repository(&self, repository: &str, files: &[(&str, &str)]) -> Result<()> {
        let bare = self.bare_path(repository);
        std::fs::create_dir_all(&bare)?;
        git(&bare, &["init", "--quiet", "--bare", "--initial-branch=main"])?;

        let seed = tempfile::tempdir()?;
        git(seed.path(), &["init", "--quiet", "--initial-branch=main"])?;
        for (name, content) in files {
            let path = seed.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        git(seed.path(), &["add", "--all"])?;
        git(
            seed.path(),
            &[
                "-c",
                "user.name=Fixture",
                "-c",
                "user.email=fixture@example.com",
                "commit",
                "--quiet",
                "--allow-empty",
                "-m",
                "Initial commit",
            ],
        )?;
        let remote = bare.to_string_lossy().into_owned();
        git(seed.path(), &["push", "--quiet", remote.as_str(), "HEAD:refs/heads/main"])?;
        Ok(())
    }

    pub fn head_message(&self, repository: &str) -> Result<String> {
        let bare = self.bare_path(repository);
        git(&bare, &["log", "-1", "--format=%s", "main"])
    }

    pub fn head_files(&self, repository: &str) -> Result<Vec<String>> {
        let bare = self.bare_path(repository);
        let listing = git(&bare, &["ls-tree", "-r", "--name-only", "main"])?;
        Ok(listing.lines().map(str::to_string).collect())
    }

    pub fn commit_count(&self, repository: &str) -> Result<usize> {
        let bare = self.bare_path(repository);
        Ok(git(&bare, &["rev-list", "--count", "main"])?.parse()?)
    }
}

/// Create `files` under `dir`.
pub fn write_files(dir: &Path, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
    }
    Ok(())
}

fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
