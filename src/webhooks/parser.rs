//! Webhook payload parser.
//!
//! Raw JSON is deserialized into loose `Raw*` structures and then converted
//! into the router's [`IssueContext`] and [`CommentContext`].
//!
//! 1. The event type comes from the `X-GitHub-Event` header
//! 2. Unknown event types return `Ok(None)` (ignored, not an error)
//! 3. Comments on pull requests return `Ok(None)`
//! 4. Malformed payloads return `Err`

use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    CommentAction, CommentContext, IssueAction, IssueContext, IssueNumber, IssueType, LabelSet,
    RepoId,
};

use super::events::TrackerEvent;

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field has a value the bot does not understand.
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses a webhook payload into a typed event.
///
/// ```
/// use triage_bot::webhooks::{TrackerEvent, parse_webhook};
///
/// let payload = br#"{
///     "action": "opened",
///     "issue": {
///         "number": 7,
///         "title": "Mailing list bounce",
///         "body": "//sig/infra",
///         "labels": [],
///         "assignee": null,
///         "user": { "login": "bob" },
///         "type": { "name": "Bug" }
///     },
///     "repository": { "owner": { "login": "openeuler" }, "name": "infrastructure" }
/// }"#;
///
/// let Some(TrackerEvent::Issue(issue)) = parse_webhook("issues", payload).unwrap() else {
///     panic!("expected an issue event");
/// };
/// assert_eq!(issue.author, "bob");
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<TrackerEvent>, ParseError> {
    match event_type {
        "issues" => parse_issue(payload).map(|e| Some(TrackerEvent::Issue(e))),
        "issue_comment" => parse_issue_comment(payload).map(|e| e.map(TrackerEvent::Comment)),
        _ => Ok(None),
    }
}

// ============================================================================
// Raw payload structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawRepository {
    owner: RawUser,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawIssueType {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    #[serde(default)]
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<RawLabel>,
    assignee: Option<RawUser>,
    user: RawUser,
    #[serde(rename = "type")]
    issue_type: Option<RawIssueType>,
    /// Present when the "issue" is really a pull request.
    pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    fn into_context(self, repo: RepoId, action: IssueAction) -> IssueContext {
        let issue_type = self.issue_type.and_then(|t| t.name);
        IssueContext {
            repo,
            number: IssueNumber(self.number),
            title: self.title,
            body: self.body.unwrap_or_default(),
            issue_type: IssueType::from_type_name(issue_type.as_deref()),
            existing_labels: self.labels.into_iter().map(|l| l.name).collect::<LabelSet>(),
            current_assignee: self.assignee.map(|a| a.login).filter(|l| !l.is_empty()),
            author: self.user.login,
            action,
        }
    }
}

// ============================================================================
// issues event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawIssuesPayload {
    action: String,
    issue: RawIssue,
    repository: RawRepository,
}

fn parse_issue(payload: &[u8]) -> Result<IssueContext, ParseError> {
    let raw: RawIssuesPayload = serde_json::from_slice(payload)?;

    let action = match raw.action.as_str() {
        "opened" => IssueAction::Opened,
        _ => IssueAction::Other,
    };
    let repo = RepoId::new(raw.repository.owner.login, raw.repository.name);

    Ok(raw.issue.into_context(repo, action))
}

// ============================================================================
// issue_comment event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawIssueCommentPayload {
    action: String,
    comment: RawComment,
    issue: RawIssue,
    repository: RawRepository,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    body: Option<String>,
    user: RawUser,
}

fn parse_issue_comment(payload: &[u8]) -> Result<Option<CommentContext>, ParseError> {
    let raw: RawIssueCommentPayload = serde_json::from_slice(payload)?;

    let action = match raw.action.as_str() {
        "created" => CommentAction::Created,
        "edited" => CommentAction::Edited,
        "deleted" => CommentAction::Deleted,
        other => {
            return Err(ParseError::InvalidField {
                field: "action",
                value: other.to_string(),
            });
        }
    };

    if raw.issue.pull_request.is_some() {
        return Ok(None);
    }

    let repo = RepoId::new(raw.repository.owner.login, raw.repository.name);
    Ok(Some(CommentContext {
        issue: raw.issue.into_context(repo, IssueAction::Other),
        action,
        commenter: raw.comment.user.login,
        body: raw.comment.body.unwrap_or_default(),
    }))
}
