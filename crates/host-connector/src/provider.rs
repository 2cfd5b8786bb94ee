//! Repository hosting provider identification.

use std::fmt;

/// The platform hosting the repository under review.
///
/// Provider-specific behavior hangs off this enum as a strategy lookup
/// rather than per-provider subclasses: anchor resolution matches on it,
/// and each [`crate::HostConnector`] implementation reports its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoProvider {
    GitHub,
    GitLab,
}

impl RepoProvider {
    /// Parse a provider key as stored on a repository record.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "github" => Some(RepoProvider::GitHub),
            "gitlab" => Some(RepoProvider::GitLab),
            _ => None,
        }
    }

    /// Lowercase key form.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoProvider::GitHub => "github",
            RepoProvider::GitLab => "gitlab",
        }
    }
}

impl fmt::Display for RepoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(RepoProvider::from_key("github"), Some(RepoProvider::GitHub));
        assert_eq!(RepoProvider::from_key("GitLab"), Some(RepoProvider::GitLab));
        assert_eq!(RepoProvider::from_key("bitbucket"), None);
    }

    #[test]
    fn test_round_trip() {
        for provider in [RepoProvider::GitHub, RepoProvider::GitLab] {
            assert_eq!(RepoProvider::from_key(provider.as_str()), Some(provider));
        }
    }
}
