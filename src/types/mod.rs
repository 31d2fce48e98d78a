//! Core domain types for the triage bot.

pub mod ids;
pub mod issue;

pub use ids::{DeliveryId, IssueNumber, RepoId};
pub use issue::{CommentAction, CommentContext, IssueAction, IssueContext, IssueType, LabelSet};
