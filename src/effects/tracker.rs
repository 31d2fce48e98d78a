//! Issue tracker effect types.

use serde::{Deserialize, Serialize};

use crate::types::{IssueNumber, LabelSet, RepoId};

/// An issue tracker operation.
///
/// The tracker serves many repositories, so every issue-scoped effect names
/// its repository explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEffect {
    // ─── Issue Mutations ──────────────────────────────────────────────────────
    /// Post a new comment on an issue.
    PostComment {
        repo: RepoId,
        number: IssueNumber,
        body: String,
    },

    /// Add labels to an issue. Labels already present are left alone.
    ApplyLabels {
        repo: RepoId,
        number: IssueNumber,
        labels: Vec<String>,
    },

    /// Make `login` an assignee of the issue.
    SetAssignee {
        repo: RepoId,
        number: IssueNumber,
        login: String,
    },

    // ─── Queries ──────────────────────────────────────────────────────────────
    /// List every label the repository accepts.
    ListRepoLabels { repo: RepoId },

    /// Look up the login the bot authenticates as.
    GetBotIdentity,
}

impl TrackerEffect {
    /// Short name of the operation, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TrackerEffect::PostComment { .. } => "post_comment",
            TrackerEffect::ApplyLabels { .. } => "apply_labels",
            TrackerEffect::SetAssignee { .. } => "set_assignee",
            TrackerEffect::ListRepoLabels { .. } => "list_repo_labels",
            TrackerEffect::GetBotIdentity => "get_bot_identity",
        }
    }
}

/// Response from a tracker effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TrackerResponse {
    /// Response to `PostComment`, `ApplyLabels` and `SetAssignee`.
    Done,

    /// Response to `ListRepoLabels`: the repository's label catalog.
    Labels(LabelSet),

    /// Response to `GetBotIdentity`.
    Identity { login: String },
}
