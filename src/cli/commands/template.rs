use super::{ensure_git_installed, Command};
use crate::external::ProcessRunner;
use crate::git::{template_files, GitHost, RepositoryIdentifier, TemplateFetcher};
use anyhow::Result;
use std::io::Write;

pub struct TemplateCommand {
    pub repository: String,
    pub host: GitHost,
    pub runner: ProcessRunner,
}

impl TemplateCommand {
    pub fn new(repository: String, host: GitHost, runner: ProcessRunner) -> Self {
        Self {
            repository,
            host,
            runner,
        }
    }

    pub fn run_with<W: Write>(&self, output: &mut W) -> Result<()> {
        ensure_git_installed(&self.runner)?;

        let repository = RepositoryIdentifier::new(self.host.clone(), self.repository.as_str())?;
        let dir = TemplateFetcher::new(self.runner.clone()).fetch_template(&repository)?;

        writeln!(output, "Files in {repository}:")?;
        for file in template_files(dir.path())? {
            writeln!(output, "  {}", file.display())?;
        }
        dir.close()?;
        Ok(())
    }
}

impl Command for TemplateCommand {
    fn execute(&self) -> Result<()> {
        self.run_with(&mut std::io::stdout())
    }
}
