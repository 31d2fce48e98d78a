//! Comment templates.
//!
//! Templates are plain text files with a fixed set of placeholder tokens
//! substituted verbatim. There is no escaping and no nesting. Templates are
//! read from disk on every render so edits apply without a restart.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::labels::has_good_first_issue;
use crate::types::LabelSet;

/// Word used in place of an assignee mention when the assignee is the author.
pub const SELF_WORD: &str = "自己";

/// Sentence substituted for `{goodissue}` when a good-first-issue label is listed.
pub const GOOD_FIRST_ISSUE_HINT: &str = "因为这个issue看起来是文档类问题, 适合新手开发者解决";

/// Comment posted when a comment mentions good-first-issue.
pub const CONTRIBUTION_GUIDE: &str = "如果您是第一次贡献社区，可以参考我们的贡献指南：https://www.openeuler.org/zh/community/contribution/";

/// The recognised placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `{issueMaker}`: the issue author's login.
    IssueAuthor,
    /// `{assignee}`: the resolved assignee's login.
    Assignee,
    /// `{label}`: one `**//label**` line per label.
    Labels,
    /// `{goodissue}`: [`GOOD_FIRST_ISSUE_HINT`] or nothing.
    GoodFirstIssue,
}

impl Placeholder {
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::IssueAuthor => "{issueMaker}",
            Placeholder::Assignee => "{assignee}",
            Placeholder::Labels => "{label}",
            Placeholder::GoodFirstIssue => "{goodissue}",
        }
    }
}

/// How an assignee mention is rendered when there is no separate assignee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelfMention {
    /// `@{assignee}` becomes [`SELF_WORD`] when the assignee is the author.
    Localized,
    /// `@{assignee}` is removed.
    #[default]
    Elide,
}

/// Runtime values for a render.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    pub author: &'a str,
    pub assignee: Option<&'a str>,
    pub labels: &'a LabelSet,
    pub self_mention: SelfMention,
}

/// Errors that can occur while loading a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a template from disk.
pub fn load_template(path: impl AsRef<Path>) -> Result<String, TemplateError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Substitutes every placeholder in `template`.
///
/// ```
/// use triage_bot::template::{Bindings, SelfMention, render};
/// use triage_bot::types::LabelSet;
///
/// let labels: LabelSet = ["sig/doc".to_string()].into_iter().collect();
/// let text = render(
///     "Hi @{issueMaker}, @{assignee} will help.\n{label}",
///     &Bindings {
///         author: "bob",
///         assignee: Some("carol"),
///         labels: &labels,
///         self_mention: SelfMention::Elide,
///     },
/// );
/// assert_eq!(text, "Hi @bob, @carol will help.\n**//sig/doc**\n");
/// ```
pub fn render(template: &str, bindings: &Bindings<'_>) -> String {
    let mut out = template.replace(Placeholder::IssueAuthor.token(), bindings.author);

    let assignee = bindings.assignee.filter(|a| !a.is_empty());
    match assignee {
        Some(assignee) if assignee != bindings.author => {
            out = out.replace(Placeholder::Assignee.token(), assignee);
        }
        _ => {
            let replacement = match (assignee, bindings.self_mention) {
                (Some(_), SelfMention::Localized) => SELF_WORD,
                _ => "",
            };
            let mention = format!("@{}", Placeholder::Assignee.token());
            out = out
                .replace(&mention, replacement)
                .replace(Placeholder::Assignee.token(), replacement);
        }
    }

    let hint = if has_good_first_issue(bindings.labels) {
        GOOD_FIRST_ISSUE_HINT
    } else {
        ""
    };
    out = out.replace(Placeholder::GoodFirstIssue.token(), hint);

    out.replace(Placeholder::Labels.token(), &format_label_list(bindings.labels))
}

/// Formats labels as one bold `//label` line each.
pub fn format_label_list(labels: &LabelSet) -> String {
    labels.iter().map(|l| format!("**//{l}**\n")).collect()
}

/// Builds the decision notice addressed to the author and, if distinct, the assignee.
pub fn render_decision_notice(template: &str, author: &str, assignee: Option<&str>) -> String {
    let mention = match assignee {
        Some(a) if !a.is_empty() && a != author => format!(" @{a}"),
        _ => String::new(),
    };
    format!("hello, @{author}{mention}{template}\n")
}
