//! Typed webhook events.
//!
//! Only the two event families the router acts on are modelled. Everything
//! else is dropped by the parser.

use serde::{Deserialize, Serialize};

use crate::types::{CommentContext, IssueContext, RepoId};

/// A parsed webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerEvent {
    /// An `issues` delivery.
    Issue(IssueContext),

    /// An `issue_comment` delivery on a plain issue.
    Comment(CommentContext),
}

impl TrackerEvent {
    /// Returns the repository this event belongs to.
    pub fn repo_id(&self) -> &RepoId {
        match self {
            TrackerEvent::Issue(issue) => &issue.repo,
            TrackerEvent::Comment(comment) => &comment.issue.repo,
        }
    }
}
