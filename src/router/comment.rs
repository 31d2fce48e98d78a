//! Newly created comments.

use tracing::debug;

use crate::assign::resolve_assignee;
use crate::effects::TrackerInterpreter;
use crate::labels::GOOD_FIRST_ISSUE;
use crate::mentors::load_mentors;
use crate::template::CONTRIBUTION_GUIDE;
use crate::types::{CommentAction, CommentContext};

use super::{BoxError, Router, TriageError};

impl<T> Router<T>
where
    T: TrackerInterpreter,
    T::Error: Into<BoxError>,
{
    /// Handles a comment event.
    ///
    /// Only newly created comments by someone other than the bot are
    /// considered, and only if they carry at least one `//` label tag.
    /// Self-comments are dropped before any tracker call.
    pub async fn handle_comment(&self, comment: &CommentContext) -> Result<(), TriageError> {
        let issue = &comment.issue;

        if comment.action != CommentAction::Created {
            debug!(repo = %issue.repo, issue = %issue.number, action = ?comment.action, "ignoring comment event");
            return Ok(());
        }

        if comment.commenter == self.bot_login {
            debug!(repo = %issue.repo, issue = %issue.number, "ignoring own comment");
            return Ok(());
        }

        let config = self.config_for(&issue.repo)?;

        let tags = self.vocabulary.extract_label_tags(&comment.body);
        if tags.is_empty() {
            debug!(repo = %issue.repo, issue = %issue.number, "comment carries no label tags");
            return Ok(());
        }

        let catalog = self.repo_labels(&issue.repo).await?;
        self.apply_labels(issue, &tags, &catalog).await?;

        if comment.body.contains(GOOD_FIRST_ISSUE) {
            self.post_comment(issue, CONTRIBUTION_GUIDE.to_string())
                .await?;
        }

        let assignee = match issue.current_assignee.as_deref().filter(|a| !a.is_empty()) {
            Some(current) => Some(current.to_string()),
            None => {
                let mentors = load_mentors(&config.mentor_file_path)?;
                let resolved = resolve_assignee(
                    None,
                    &issue.author,
                    &tags,
                    &mentors,
                    &config.author_policy(),
                );
                self.assign(issue, resolved.as_deref()).await?;
                resolved
            }
        };

        self.notify_decision(config, issue, &tags, assignee.as_deref())
            .await
    }
}
