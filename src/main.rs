use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use submit50_classroom::cli::commands::{Command, SubmitCommand, TemplateCommand};
use submit50_classroom::cli::{Cli, Commands};
use submit50_classroom::{init_telemetry, ProcessCommandExecutor, ProcessRunner, SubmitConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Only the outermost, user-facing message; causes go to the debug log.
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SubmitConfig::load()?;
    init_telemetry(&config.observability, cli.verbose)?;

    let host = cli.resolve_host(config.git.host);
    let runner = ProcessRunner::new(Arc::new(ProcessCommandExecutor), config.git.program);

    match cli.command {
        Commands::Submit {
            repository,
            username,
            yes,
        } => SubmitCommand::new(repository, username, host, runner)?
            .with_assume_yes(yes)
            .execute(),
        Commands::Template { repository } => TemplateCommand::new(repository, host, runner).execute(),
    }
}
