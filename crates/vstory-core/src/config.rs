//! Configuration for a story corpus.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the corpus root.
pub const ROOT_ENV_VAR: &str = "VSTORY_ROOT";

/// Corpus root used when nothing else is configured.
pub const DEFAULT_ROOT: &str = "stories";

/// Configuration for a [`Corpus`](crate::Corpus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Directory holding the domain directories.
    pub root: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

impl CorpusConfig {
    /// Read the root from `VSTORY_ROOT`, falling back to the default.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(ROOT_ENV_VAR).map(PathBuf::from))
    }

    fn from_env_value(value: Option<PathBuf>) -> Self {
        match value {
            Some(root) if !root.as_os_str().is_empty() => Self { root },
            _ => Self::default(),
        }
    }

    /// Set the corpus root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// `{root}/{domain}`
    pub fn domain_dir(&self, domain: &str) -> PathBuf {
        self.root.join(domain)
    }

    /// `{root}/{domain}/{topic}`
    pub fn topic_dir(&self, domain: &str, topic: &str) -> PathBuf {
        self.domain_dir(domain).join(topic)
    }

    /// The configured root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
