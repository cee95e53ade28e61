use super::{ensure_git_installed, Command};
use crate::external::ProcessRunner;
use crate::git::{GitHost, RepositoryIdentifier, SubmissionClient};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub struct SubmitCommand {
    pub repository: String,
    pub username: String,
    pub host: GitHost,
    pub runner: ProcessRunner,
    pub work_tree: PathBuf,
    pub assume_yes: bool,
}

impl SubmitCommand {
    pub fn new(repository: String, username: String, host: GitHost, runner: ProcessRunner) -> Result<Self> {
        Ok(Self {
            repository,
            username,
            host,
            runner,
            work_tree: std::env::current_dir()?,
            assume_yes: false,
        })
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn with_work_tree(mut self, work_tree: impl Into<PathBuf>) -> Self {
        self.work_tree = work_tree.into();
        self
    }

    /// Runs the submission, asking on `input` before pushing.
    pub fn run_with<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<bool> {
        ensure_git_installed(&self.runner)?;

        let repository = RepositoryIdentifier::new(self.host.clone(), self.repository.as_str())?;
        let client = SubmissionClient::new(
            self.username.as_str(),
            repository,
            self.runner.clone(),
            self.work_tree.clone(),
        );

        writeln!(output, "Connecting to {}...", client.repository())?;
        let session = client.clone_bare()?;

        let files = session.stage_all()?;
        writeln!(output, "Files that will be submitted:")?;
        if files.is_empty() {
            writeln!(output, "  (none)")?;
        }
        for file in &files {
            writeln!(output, "  {}", file.display())?;
        }

        if !self.assume_yes && !confirm(input, output)? {
            writeln!(output, "Submission cancelled.")?;
            return Ok(false);
        }

        session.commit_and_push()?;
        writeln!(output, "Submitted to {}.", session.client().repository())?;
        session.close()?;
        Ok(true)
    }
}

impl Command for SubmitCommand {
    fn execute(&self) -> Result<()> {
        let stdin = std::io::stdin();
        self.run_with(&mut stdin.lock(), &mut std::io::stdout())?;
        Ok(())
    }
}

fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "Keep in mind the course's policy on academic honesty. Are you sure you want to submit these files (yes/no)? ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
