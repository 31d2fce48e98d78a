//! Mentor table loading.
//!
//! A mentor table is a JSON array of records, each mapping a set of trigger
//! words to a label and to the person responsible for that label:
//!
//! ```json
//! [
//!   { "words": ["mail", "邮件"], "label": "sig/infra", "name": "carol" }
//! ]
//! ```
//!
//! The table is read from disk on every call so that edits take effect
//! without a restart. Order matters: resolvers scan it front to back and the
//! first matching entry wins.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One row of the mentor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    /// Trigger words, compared case-insensitively against extracted words.
    pub words: Vec<String>,
    /// Label applied when any of `words` is found.
    pub label: String,
    /// Login of the mentor responsible for `label`.
    pub name: String,
}

impl Mentor {
    /// Returns true if `word` is one of this mentor's trigger words.
    ///
    /// Extracted words are already lower-cased, so the comparison only has to
    /// fold the table side.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.trim().to_lowercase() == word)
    }
}

/// Errors that can occur while loading a mentor table.
#[derive(Debug, Error)]
pub enum MentorError {
    /// The file could not be read.
    #[error("failed to read mentor table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of mentor records.
    #[error("malformed mentor table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads the mentor table at `path`, preserving file order.
pub fn load_mentors(path: impl AsRef<Path>) -> Result<Vec<Mentor>, MentorError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| MentorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_mentors(&bytes).map_err(|source| MentorError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a mentor table from raw JSON bytes.
pub fn parse_mentors(bytes: &[u8]) -> Result<Vec<Mentor>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_entries_in_file_order() {
        let file = write_table(
            r#"[
                {"words": ["mail"], "label": "sig/infra", "name": "carol"},
                {"words": ["docs", "文档"], "label": "sig/doc", "name": "dave"},
                {"words": ["mail"], "label": "sig/other", "name": "erin"}
            ]"#,
        );

        let mentors = load_mentors(file.path()).unwrap();

        let labels: Vec<&str> = mentors.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["sig/infra", "sig/doc", "sig/other"]);
        assert_eq!(mentors[1].words, vec!["docs", "文档"]);
        assert_eq!(mentors[1].name, "dave");
    }

    #[test]
    fn empty_table_is_valid() {
        let file = write_table("[]");
        assert!(load_mentors(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_mentors(&path).unwrap_err();

        assert!(matches!(err, MentorError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let file = write_table(r#"{"words": ["mail"]}"#);
        assert!(matches!(
            load_mentors(file.path()),
            Err(MentorError::Parse { .. })
        ));
    }

    #[test]
    fn missing_field_is_parse_error() {
        let file = write_table(r#"[{"words": ["mail"], "label": "sig/infra"}]"#);
        assert!(matches!(
            load_mentors(file.path()),
            Err(MentorError::Parse { .. })
        ));
    }

    #[test]
    fn reload_sees_edits() {
        let file = write_table(r#"[{"words": ["a"], "label": "x", "name": "n"}]"#);
        assert_eq!(load_mentors(file.path()).unwrap().len(), 1);

        std::fs::write(file.path(), "[]").unwrap();

        assert!(load_mentors(file.path()).unwrap().is_empty());
    }

    #[test]
    fn has_word_folds_case_on_table_side() {
        let mentor = Mentor {
            words: vec!["Gitee".to_string(), "CLA".to_string()],
            label: "sig/infra".to_string(),
            name: "carol".to_string(),
        };

        assert!(mentor.has_word("gitee"));
        assert!(mentor.has_word("cla"));
        assert!(!mentor.has_word("git"));
    }
}
