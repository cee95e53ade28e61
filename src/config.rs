use crate::git::GitHost;
use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for submit50-classroom
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubmitConfig {
    /// Git executable and remote host
    pub git: GitConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitConfig {
    /// Remote host prefix, e.g. `git@github.com:`
    pub host: GitHost,
    /// Name or path of the git executable
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            host: GitHost::default(),
            program: crate::external::runner::DEFAULT_PROGRAM.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub level: String,
    /// `text` or `json`
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl SubmitConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (submit50.toml, .submit50rc) in `dir`
    /// 3. Environment variables (prefixed with SUBMIT50_, e.g. SUBMIT50_GIT_HOST)
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&SubmitConfig::default())?);

        let toml = dir.join("submit50.toml");
        if toml.exists() {
            builder = builder.add_source(File::from(toml));
        }

        let rc = dir.join(".submit50rc");
        if rc.exists() {
            builder = builder.add_source(File::from(rc).format(config::FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("SUBMIT50")
                .separator("_")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load from the current directory, after reading a `.env` file if present.
    pub fn load() -> Result<Self> {
        Self::load_env_file()?;
        Self::load_from(&std::env::current_dir()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::debug!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
