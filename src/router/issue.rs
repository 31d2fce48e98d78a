//! Newly opened issues.

use tracing::{debug, info};

use crate::assign::resolve_assignee;
use crate::config::RepoConfig;
use crate::effects::TrackerInterpreter;
use crate::labels::{labels_from_words, resolve_labels};
use crate::mentors::load_mentors;
use crate::template::{Bindings, SelfMention, load_template, render};
use crate::types::{IssueAction, IssueContext};

use super::{BoxError, Router, TriageError};

impl<T> Router<T>
where
    T: TrackerInterpreter,
    T::Error: Into<BoxError>,
{
    /// Handles an issue event.
    ///
    /// Only `opened` events do anything. The configured welcome comment is
    /// always posted first. The rest depends on whether the issue was filed
    /// with labels already.
    pub async fn handle_issue(&self, issue: &IssueContext) -> Result<(), TriageError> {
        if issue.action != IssueAction::Opened {
            debug!(repo = %issue.repo, issue = %issue.number, "ignoring issue event");
            return Ok(());
        }

        let config = self.config_for(&issue.repo)?;
        info!(
            repo = %issue.repo,
            issue = %issue.number,
            title = %issue.title,
            issue_type = ?issue.issue_type,
            "triaging new issue"
        );

        let welcome = load_template(&config.issue_comment_tpl_path)?;
        self.post_comment(issue, welcome).await?;

        if issue.existing_labels.is_empty() {
            self.triage_unlabelled(config, issue).await
        } else {
            self.triage_labelled(config, issue).await
        }
    }

    /// Labels, assigns and introduces mentors for an issue filed without labels.
    async fn triage_unlabelled(
        &self,
        config: &RepoConfig,
        issue: &IssueContext,
    ) -> Result<(), TriageError> {
        let mentors = load_mentors(&config.mentor_file_path)?;
        let tags = self.vocabulary.extract_label_tags(&issue.body);
        let words = self.vocabulary.extract_words(&issue.body);
        debug!(repo = %issue.repo, issue = %issue.number, ?tags, ?words, "extracted signals");

        let labels = resolve_labels(&self.type_labels, issue.issue_type, &tags, &words, &mentors);
        let catalog = self.repo_labels(&issue.repo).await?;
        self.apply_labels(issue, &labels, &catalog).await?;

        let assignee = resolve_assignee(
            issue.current_assignee.as_deref(),
            &issue.author,
            &labels,
            &mentors,
            &config.author_policy(),
        );
        self.assign(issue, assignee.as_deref()).await?;

        // Labels only the trigger words brought in get a mentor comment.
        let type_label = self.type_labels.label_for(issue.issue_type);
        let mut suggested = labels_from_words(&words, &mentors);
        suggested.retain(|l| !tags.contains(l) && l != type_label);
        if !suggested.is_empty() {
            let template = load_template(&config.mentor_tpl_path)?;
            let body = render(
                &template,
                &Bindings {
                    author: &issue.author,
                    assignee: assignee.as_deref(),
                    labels: &suggested,
                    self_mention: SelfMention::Elide,
                },
            );
            self.post_comment(issue, body).await?;
        }

        // The catalog only limits what is applied, not what is announced.
        self.notify_decision(config, issue, &labels, assignee.as_deref())
            .await
    }

    /// Assigns and announces the owner of an issue filed with labels.
    async fn triage_labelled(
        &self,
        config: &RepoConfig,
        issue: &IssueContext,
    ) -> Result<(), TriageError> {
        let mentors = load_mentors(&config.mentor_file_path)?;
        let assignee = resolve_assignee(
            issue.current_assignee.as_deref(),
            &issue.author,
            &issue.existing_labels,
            &mentors,
            &config.author_policy(),
        );
        self.assign(issue, assignee.as_deref()).await?;

        if assignee.is_some() {
            let template = load_template(&config.assign_tpl_path)?;
            let body = render(
                &template,
                &Bindings {
                    author: &issue.author,
                    assignee: assignee.as_deref(),
                    labels: &issue.existing_labels,
                    self_mention: SelfMention::Localized,
                },
            );
            self.post_comment(issue, body).await?;
        }

        self.notify_decision(config, issue, &issue.existing_labels, assignee.as_deref())
            .await
    }
}
