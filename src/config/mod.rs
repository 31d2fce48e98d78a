//! Bot configuration.
//!
//! The configuration file is YAML and lists one or more items, each covering
//! a set of repositories:
//!
//! ```yaml
//! config_items:
//!   - repos: ["openeuler/infrastructure", "src-openeuler"]
//!     excluded_repos: ["src-openeuler/kernel"]
//!     mentor_file_path: /etc/triage/mentors.json
//!     issue_comment_tpl_path: /etc/triage/issue_comment.md
//!     decision_tpl_path: /etc/triage/decision.md
//!     mentor_tpl_path: /etc/triage/mentor.md
//!     assign_tpl_path: /etc/triage/assign.md
//!     privileged_accounts: ["open_euler"]
//! ```
//!
//! A `repos` entry is either `org/repo` or a bare `org` covering every
//! repository of that organization. The first matching item wins.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assign::PrivilegedAccounts;
use crate::types::RepoId;

/// Errors that can occur while loading or querying the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config item {index}: {reason}")]
    Invalid { index: usize, reason: String },

    #[error("no configuration covers repository {0}")]
    NoConfigForRepo(RepoId),
}

/// Which repositories a config item applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFilter {
    /// `org/repo` or bare `org` entries.
    pub repos: Vec<String>,

    /// `org/repo` entries carved out of an org-wide `repos` entry.
    #[serde(default)]
    pub excluded_repos: Vec<String>,
}

impl RepoFilter {
    pub fn matches(&self, repo: &RepoId) -> bool {
        let full = repo.to_string();
        if self.excluded_repos.iter().any(|r| *r == full) {
            return false;
        }
        self.repos.iter().any(|r| *r == full || *r == repo.owner)
    }
}

/// Settings for one group of repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    #[serde(flatten)]
    pub filter: RepoFilter,

    /// Mentor table (JSON).
    #[serde(alias = "menter_file_path")]
    pub mentor_file_path: PathBuf,

    /// Comment posted on every newly opened issue.
    pub issue_comment_tpl_path: PathBuf,

    /// Body of the decision notice.
    #[serde(alias = "descision_tpl_path")]
    pub decision_tpl_path: PathBuf,

    /// Comment suggesting mentor labels found in the issue text.
    #[serde(alias = "pariti_tpl_path")]
    pub mentor_tpl_path: PathBuf,

    /// Comment announcing the assignee.
    pub assign_tpl_path: PathBuf,

    /// Accounts that are assigned to issues they open.
    #[serde(default)]
    pub privileged_accounts: Vec<String>,
}

impl RepoConfig {
    pub fn author_policy(&self) -> PrivilegedAccounts {
        PrivilegedAccounts::new(self.privileged_accounts.iter().cloned())
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid { index, reason };

        if self.filter.repos.iter().all(|r| r.trim().is_empty()) {
            return Err(invalid("repos must not be empty".to_string()));
        }

        let paths = [
            ("mentor_file_path", &self.mentor_file_path),
            ("issue_comment_tpl_path", &self.issue_comment_tpl_path),
            ("decision_tpl_path", &self.decision_tpl_path),
            ("mentor_tpl_path", &self.mentor_tpl_path),
            ("assign_tpl_path", &self.assign_tpl_path),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(invalid(format!("{name} must be set")));
            }
        }

        Ok(())
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub config_items: Vec<RepoConfig>,
}

impl Configuration {
    /// Loads and validates the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Configuration =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that every item names its repositories and all of its files.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config_items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| item.validate(index))
    }

    /// Returns the first item covering `repo`.
    pub fn config_for(&self, repo: &RepoId) -> Result<&RepoConfig, ConfigError> {
        self.config_items
            .iter()
            .find(|item| item.filter.matches(repo))
            .ok_or_else(|| ConfigError::NoConfigForRepo(repo.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::AuthorPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
config_items:
  - repos: ["openeuler/infrastructure", "src-openeuler"]
    excluded_repos: ["src-openeuler/kernel"]
    mentor_file_path: /etc/triage/mentors.json
    issue_comment_tpl_path: /etc/triage/issue_comment.md
    decision_tpl_path: /etc/triage/decision.md
    mentor_tpl_path: /etc/triage/mentor.md
    assign_tpl_path: /etc/triage/assign.md
    privileged_accounts: ["open_euler"]
  - repos: ["src-openeuler/kernel"]
    mentor_file_path: /etc/triage/kernel/mentors.json
    issue_comment_tpl_path: /etc/triage/kernel/issue_comment.md
    decision_tpl_path: /etc/triage/kernel/decision.md
    mentor_tpl_path: /etc/triage/kernel/mentor.md
    assign_tpl_path: /etc/triage/kernel/assign.md
"#;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_sample() {
        let file = write_config(SAMPLE);
        let config = Configuration::load(file.path()).unwrap();

        assert_eq!(config.config_items.len(), 2);
        let first = &config.config_items[0];
        assert_eq!(first.mentor_file_path, PathBuf::from("/etc/triage/mentors.json"));
        assert!(first.author_policy().is_privileged("open_euler"));
        assert!(config.config_items[1].privileged_accounts.is_empty());
    }

    #[test]
    fn legacy_key_spellings_load() {
        let legacy = r#"
config_items:
  - repos: ["openeuler"]
    menter_file_path: /etc/triage/mentors.json
    issue_comment_tpl_path: /etc/triage/issue_comment.md
    descision_tpl_path: /etc/triage/decision.md
    pariti_tpl_path: /etc/triage/mentor.md
    pariti_ai_tpl_path: /etc/triage/mentor_ai.md
    assign_tpl_path: /etc/triage/assign.md
"#;
        let file = write_config(legacy);
        let config = Configuration::load(file.path()).unwrap();

        let item = &config.config_items[0];
        assert_eq!(item.mentor_file_path, PathBuf::from("/etc/triage/mentors.json"));
        assert_eq!(item.decision_tpl_path, PathBuf::from("/etc/triage/decision.md"));
        assert_eq!(item.mentor_tpl_path, PathBuf::from("/etc/triage/mentor.md"));
    }

    #[test]
    fn exact_repo_matches() {
        let config: Configuration = serde_yaml::from_str(SAMPLE).unwrap();
        let item = config
            .config_for(&RepoId::new("openeuler", "infrastructure"))
            .unwrap();
        assert_eq!(item.filter.repos[0], "openeuler/infrastructure");
    }

    #[test]
    fn org_entry_covers_all_repos() {
        let config: Configuration = serde_yaml::from_str(SAMPLE).unwrap();
        let item = config.config_for(&RepoId::new("src-openeuler", "gcc")).unwrap();
        assert_eq!(item.mentor_file_path, PathBuf::from("/etc/triage/mentors.json"));
    }

    #[test]
    fn excluded_repo_falls_through_to_next_item() {
        let config: Configuration = serde_yaml::from_str(SAMPLE).unwrap();
        let item = config
            .config_for(&RepoId::new("src-openeuler", "kernel"))
            .unwrap();
        assert_eq!(
            item.mentor_file_path,
            PathBuf::from("/etc/triage/kernel/mentors.json")
        );
    }

    #[test]
    fn uncovered_repo_is_an_error() {
        let config: Configuration = serde_yaml::from_str(SAMPLE).unwrap();
        let err = config
            .config_for(&RepoId::new("openeuler", "community"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoConfigForRepo(_)));
        assert!(err.to_string().contains("openeuler/community"));
    }

    #[test]
    fn empty_repos_rejected() {
        let file = write_config(
            r#"
config_items:
  - repos: []
    mentor_file_path: m.json
    issue_comment_tpl_path: a.md
    decision_tpl_path: b.md
    mentor_tpl_path: c.md
    assign_tpl_path: d.md
"#,
        );
        assert!(matches!(
            Configuration::load(file.path()),
            Err(ConfigError::Invalid { index: 0, .. })
        ));
    }

    #[test]
    fn empty_path_rejected() {
        let file = write_config(
            r#"
config_items:
  - repos: ["openeuler"]
    mentor_file_path: m.json
    issue_comment_tpl_path: ""
    decision_tpl_path: b.md
    mentor_tpl_path: c.md
    assign_tpl_path: d.md
"#,
        );
        let err = Configuration::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("issue_comment_tpl_path"));
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let file = write_config(
            r#"
config_items:
  - repos: ["openeuler"]
    mentor_file_path: m.json
"#,
        );
        assert!(matches!(
            Configuration::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Configuration::load(dir.path().join("config.yaml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
