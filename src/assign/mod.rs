//! Assignee resolution.
//!
//! Precedence, first success wins:
//!
//! 1. An existing assignee is kept.
//! 2. A privileged author (see [`AuthorPolicy`]) is assigned to their own issue.
//! 3. The first mentor, in table order, whose label is among the issue's labels.
//! 4. Otherwise nobody. That is a valid outcome, not an error.
//!
//! Resolution is pure; the router decides whether an assignment call is
//! needed by comparing the result with the current assignee.

use std::collections::BTreeSet;

use crate::mentors::Mentor;
use crate::types::LabelSet;

/// Decides whether an issue author is assigned their own issues.
pub trait AuthorPolicy {
    fn is_privileged(&self, login: &str) -> bool;
}

/// An [`AuthorPolicy`] backed by a fixed list of organization accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegedAccounts {
    logins: BTreeSet<String>,
}

impl PrivilegedAccounts {
    pub fn new<I, S>(logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrivilegedAccounts {
            logins: logins.into_iter().map(Into::into).collect(),
        }
    }
}

impl AuthorPolicy for PrivilegedAccounts {
    fn is_privileged(&self, login: &str) -> bool {
        self.logins.contains(login)
    }
}

/// Resolves who should own an issue.
///
/// Returns `None` when nobody qualifies.
pub fn resolve_assignee(
    current_assignee: Option<&str>,
    author: &str,
    labels: &LabelSet,
    mentors: &[Mentor],
    policy: &dyn AuthorPolicy,
) -> Option<String> {
    if let Some(current) = current_assignee.filter(|a| !a.is_empty()) {
        return Some(current.to_string());
    }

    if policy.is_privileged(author) {
        return Some(author.to_string());
    }

    mentors
        .iter()
        .find(|m| labels.contains(&m.label))
        .map(|m| m.name.clone())
}
