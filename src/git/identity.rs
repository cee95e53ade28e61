//! Command-line configuration overrides for identity and credentials.
//!
//! Overrides are derived once from the user's git configuration and passed as
//! `-c key=value` on every later invocation. Keys the user already configured
//! are left alone.

use super::repository::{GitHost, DEFAULT_DOMAIN};
use crate::external::{ExecutionError, ProcessRunner};

pub const USER_NAME: &str = "user.name";
pub const USER_EMAIL: &str = "user.email";
pub const CREDENTIAL_HELPER: &str = "credential.helper";

/// In-memory credential cache helper shipped with git.
pub const CREDENTIAL_CACHE: &str = "cache";

/// `git config --get` exits with 1 when the key is not set.
const KEY_NOT_FOUND_STATUS: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOverride {
    pub key: String,
    pub value: String,
}

impl ConfigOverride {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn to_args(&self) -> [String; 2] {
        ["-c".to_string(), format!("{}={}", self.key, self.value)]
    }
}

/// Outcome of asking git whether a key is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProbe {
    Configured,
    NotConfigured,
    QueryFailed(ExecutionError),
}

impl ConfigProbe {
    /// Whether an override should be added. A failed query counts as unset.
    pub fn needs_override(&self) -> bool {
        !matches!(self, ConfigProbe::Configured)
    }
}

pub fn probe(runner: &ProcessRunner, key: &str) -> ConfigProbe {
    match runner.run(&["config", "--get", key]) {
        Ok(_) => ConfigProbe::Configured,
        Err(e) if e.exit_code() == Some(KEY_NOT_FOUND_STATUS) => {
            tracing::debug!(key, error = %e, "git config key not set");
            ConfigProbe::NotConfigured
        }
        Err(e) => {
            tracing::debug!(key, error = %e, "git config query failed");
            ConfigProbe::QueryFailed(e)
        }
    }
}

/// `<identity>@users.noreply.<domain>`, using the default domain when the host
/// prefix has none (local paths, `file://`).
pub fn noreply_email(identity: &str, host: &GitHost) -> String {
    let domain = host.domain().unwrap_or(DEFAULT_DOMAIN);
    format!("{identity}@users.noreply.{domain}")
}

/// Overrides for `user.name`, `user.email` and `credential.helper`, in that
/// order, for each key that is not already configured.
pub fn derive_overrides(runner: &ProcessRunner, identity: &str, host: &GitHost) -> Vec<ConfigOverride> {
    let candidates = [
        (USER_NAME, identity.to_string()),
        (USER_EMAIL, noreply_email(identity, host)),
        (CREDENTIAL_HELPER, CREDENTIAL_CACHE.to_string()),
    ];

    let mut overrides = Vec::new();
    for (key, value) in candidates {
        let outcome = probe(runner, key);
        if let ConfigProbe::QueryFailed(e) = &outcome {
            tracing::warn!(key, error = %e, "could not read git config, overriding it anyway");
        }
        if outcome.needs_override() {
            overrides.push(ConfigOverride::new(key, value));
        }
    }
    overrides
}
