//! Event-scoped views of an issue and of a comment on it.
//!
//! These are built once at the edge (the webhook parser) and are never
//! mutated afterwards. The router and the resolvers only read them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::{IssueNumber, RepoId};

/// A set of label names.
///
/// Only membership matters. `BTreeSet` keeps iteration order stable so that
/// rendered label lists and API calls are deterministic.
pub type LabelSet = BTreeSet<String>;

/// The category an issue was filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Bug,
    Requirement,
    Cve,
    Translation,
    OpenSourcePractice,
    Other,
}

impl IssueType {
    /// Maps the tracker's issue type name onto a category.
    ///
    /// Unknown and missing names fall back to [`IssueType::Other`].
    ///
    /// ```
    /// use triage_bot::types::IssueType;
    ///
    /// assert_eq!(IssueType::from_type_name(Some("Bug")), IssueType::Bug);
    /// assert_eq!(IssueType::from_type_name(Some("CVE和安全问题")), IssueType::Cve);
    /// assert_eq!(IssueType::from_type_name(Some("Task")), IssueType::Other);
    /// assert_eq!(IssueType::from_type_name(None), IssueType::Other);
    /// ```
    pub fn from_type_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("Bug") => IssueType::Bug,
            Some("Requirement") => IssueType::Requirement,
            Some("CVE和安全问题") | Some("CVE") => IssueType::Cve,
            Some("翻译") | Some("Translation") => IssueType::Translation,
            Some("开源实习") => IssueType::OpenSourcePractice,
            _ => IssueType::Other,
        }
    }
}

/// What happened to the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    /// The issue was just opened.
    Opened,
    /// Any other lifecycle action (edited, closed, labeled, ...).
    Other,
}

/// Action performed on an issue comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentAction {
    Created,
    Edited,
    Deleted,
}

/// Read-only view of an issue as carried by an inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContext {
    pub repo: RepoId,
    pub number: IssueNumber,
    pub title: String,
    pub body: String,
    pub issue_type: IssueType,
    /// Labels already on the issue when the event was emitted.
    pub existing_labels: LabelSet,
    /// The current assignee login, if any.
    pub current_assignee: Option<String>,
    /// Login of the issue author.
    pub author: String,
    pub action: IssueAction,
}

/// Read-only view of a comment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentContext {
    /// The issue the comment was posted on.
    pub issue: IssueContext,
    pub action: CommentAction,
    /// Login of the comment author.
    pub commenter: String,
    pub body: String,
}
