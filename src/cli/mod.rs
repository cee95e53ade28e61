use crate::git::GitHost;
use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "submit50-classroom")]
#[command(about = "Submit problem set work to your assignment repository")]
#[command(long_about = "Fetches assignment templates and submits the files in the current \
                       directory to your assignment repository using the git on your PATH.")]
pub struct Cli {
    /// Show git diagnostics and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Remote host prefix, overriding configuration (default: git@github.com:)
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// `--host` if given, otherwise the configured host.
    pub fn resolve_host(&self, configured: GitHost) -> GitHost {
        self.host.clone().map(GitHost::new).unwrap_or(configured)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Commit the files in the current directory and push them to your repository
    Submit {
        /// Repository path on the host, e.g. org/hello-alice
        repository: String,
        /// Your username on the host
        #[arg(short, long)]
        username: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// List the files an assignment template provides
    Template {
        /// Repository path on the host, e.g. org/hello-template
        repository: String,
    },
}
