use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "git@github.com:";
pub const DEFAULT_DOMAIN: &str = "github.com";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Repository path must not be empty.")]
    EmptyPath,
}

/// Remote host prefix such as `git@github.com:` or `https://github.com/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GitHost(String);

impl GitHost {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Host name without scheme, user or path, e.g. `github.com`. `None` for
    /// prefixes with no host part, such as `file:///srv/git/` or `/srv/git`.
    pub fn domain(&self) -> Option<&str> {
        let rest = match self.0.find("://") {
            Some(idx) => &self.0[idx + 3..],
            None => self.0.as_str(),
        };
        let end = rest.find(|c: char| c == '/' || c == ':').unwrap_or(rest.len());
        let authority = &rest[..end];
        let domain = match authority.rfind('@') {
            Some(idx) => &authority[idx + 1..],
            None => authority,
        };
        (!domain.is_empty()).then_some(domain)
    }
}

impl Default for GitHost {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl std::fmt::Display for GitHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A repository on a host. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentifier {
    host: GitHost,
    path: String,
}

impl RepositoryIdentifier {
    pub fn new(host: GitHost, path: impl Into<String>) -> Result<Self, RepositoryError> {
        let path = path.into();
        if path.trim().trim_matches('/').is_empty() {
            return Err(RepositoryError::EmptyPath);
        }
        Ok(Self { host, path })
    }

    pub fn host(&self) -> &GitHost {
        &self.host
    }

    /// `<host><path>`, joined with a single `/` only when the host does not
    /// already end in `:` or `/`.
    pub fn remote_url(&self) -> String {
        let host = self.host.as_str();
        let path = self.path.trim_start_matches('/');
        if host.is_empty() || host.ends_with(':') || host.ends_with('/') {
            format!("{host}{path}")
        } else {
            format!("{host}/{path}")
        }
    }
}

impl std::fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.remote_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn repo(host: &str, path: &str) -> RepositoryIdentifier {
        RepositoryIdentifier::new(GitHost::new(host), path).unwrap()
    }

    #[test]
    fn test_default_host_remote_url() {
        let id = RepositoryIdentifier::new(GitHost::default(), "org/repo").unwrap();
        assert_eq!(id.remote_url(), "git@github.com:org/repo");
        assert_eq!(id.to_string(), "git@github.com:org/repo");
    }

    #[test]
    fn test_remote_url_never_doubles_separators() {
        assert_eq!(repo("https://github.com/", "org/repo").remote_url(), "https://github.com/org/repo");
        assert_eq!(repo("https://github.com/", "/org/repo").remote_url(), "https://github.com/org/repo");
        assert_eq!(repo("https://github.com", "org/repo").remote_url(), "https://github.com/org/repo");
        assert_eq!(repo("git@github.com:", "/org/repo").remote_url(), "git@github.com:org/repo");
        assert_eq!(repo("/srv/git", "org/repo").remote_url(), "/srv/git/org/repo");
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(
            RepositoryIdentifier::new(GitHost::default(), " / "),
            Err(RepositoryError::EmptyPath)
        );
    }

    #[test]
    fn test_domain_extraction() {
        assert_eq!(GitHost::default().domain(), Some("github.com"));
        assert_eq!(GitHost::new("https://github.com/").domain(), Some("github.com"));
        assert_eq!(GitHost::new("ssh://git@gitlab.example.org:2222/").domain(), Some("gitlab.example.org"));
        assert_eq!(GitHost::new("https://user@github.example.com/").domain(), Some("github.example.com"));
    }

    #[test]
    fn test_domain_absent_for_local_hosts() {
        assert_eq!(GitHost::new("file:///srv/git/").domain(), None);
        assert_eq!(GitHost::new("/srv/git").domain(), None);
        assert_eq!(GitHost::new("").domain(), None);
    }

    proptest! {
        #[test]
        fn prop_remote_url_joins_with_one_separator(
            host in "[a-z@.:/]{0,20}",
            path in "/{0,2}[a-z0-9._-]{1,8}(/[a-z0-9._-]{1,8}){0,3}",
        ) {
            let id = RepositoryIdentifier::new(GitHost::new(host.clone()), path.clone()).unwrap();
            let url = id.remote_url();

            prop_assert!(url.starts_with(&host));
            let tail = &url[host.len()..];
            let path_part = path.trim_start_matches('/');
            prop_assert!(tail.ends_with(path_part));

            let separator = &tail[..tail.len() - path_part.len()];
            if host.is_empty() || host.ends_with(':') || host.ends_with('/') {
                prop_assert_eq!(separator, "");
            } else {
                prop_assert_eq!(separator, "/");
            }
        }
    }
}
