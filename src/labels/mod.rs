//! Label resolution.
//!
//! Candidate labels for an issue come from three sources, unioned:
//!
//! 1. Structured `//` tags in the text, passed through verbatim.
//! 2. Exactly one default label for the issue's type.
//! 3. The label of the first mentor (in table order) owning each trigger word.
//!
//! Candidates are proposals only. Before anything is applied they must be
//! intersected with the repository's label catalog via [`filter_to_catalog`].

use crate::mentors::Mentor;
use crate::types::{IssueType, LabelSet};

/// Label whose presence triggers the decision notice.
pub const DECISION_LABEL: &str = "kind/decision";

/// Marker identifying issues suitable for first-time contributors.
pub const GOOD_FIRST_ISSUE: &str = "good-first-issue";

/// The default label applied for each issue type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLabels {
    pub bug: String,
    pub requirement: String,
    pub cve: String,
    pub translation: String,
    pub open_source_practice: String,
    pub other: String,
}

impl TypeLabels {
    /// Returns the default label for `issue_type`.
    pub fn label_for(&self, issue_type: IssueType) -> &str {
        match issue_type {
            IssueType::Bug => &self.bug,
            IssueType::Requirement => &self.requirement,
            IssueType::Cve => &self.cve,
            IssueType::Translation => &self.translation,
            IssueType::OpenSourcePractice => &self.open_source_practice,
            IssueType::Other => &self.other,
        }
    }

    /// Returns all six default labels.
    pub fn all(&self) -> [&str; 6] {
        [
            self.bug.as_str(),
            self.requirement.as_str(),
            self.cve.as_str(),
            self.translation.as_str(),
            self.open_source_practice.as_str(),
            self.other.as_str(),
        ]
    }
}

impl Default for TypeLabels {
    fn default() -> Self {
        TypeLabels {
            bug: "bug/unconfirmed".to_string(),
            requirement: "kind/feature_request".to_string(),
            cve: "cve/pending".to_string(),
            translation: "kind/translation".to_string(),
            open_source_practice: "activity/开源实习".to_string(),
            other: "kind/task".to_string(),
        }
    }
}

/// Maps trigger words to mentor labels.
///
/// For each word the first mentor owning it contributes its label; words no
/// mentor owns contribute nothing.
pub fn labels_from_words(words: &LabelSet, mentors: &[Mentor]) -> LabelSet {
    words
        .iter()
        .filter_map(|word| mentors.iter().find(|m| m.has_word(word)))
        .map(|m| m.label.clone())
        .collect()
}

/// Computes the candidate label set for a new issue.
pub fn resolve_labels(
    type_labels: &TypeLabels,
    issue_type: IssueType,
    tag_labels: &LabelSet,
    trigger_words: &LabelSet,
    mentors: &[Mentor],
) -> LabelSet {
    let mut labels = tag_labels.clone();
    labels.insert(type_labels.label_for(issue_type).to_string());
    labels.extend(labels_from_words(trigger_words, mentors));
    labels
}

/// Restricts `proposed` to labels the repository accepts.
pub fn filter_to_catalog(proposed: &LabelSet, catalog: &LabelSet) -> LabelSet {
    proposed.intersection(catalog).cloned().collect()
}

/// Returns true if any label carries the good-first-issue marker.
pub fn has_good_first_issue(labels: &LabelSet) -> bool {
    labels.iter().any(|l| l.contains(GOOD_FIRST_ISSUE))
}
