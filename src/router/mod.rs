//! Event routing.
//!
//! The [`Router`] receives one issue or comment event at a time, runs the
//! extractors and resolvers over it, and turns the outcome into tracker
//! effects. It keeps no state between events: configuration is fixed at
//! construction, while mentor tables and templates are re-read per event.
//!
//! - [`Router::handle_issue`]: newly opened issues
//! - [`Router::handle_comment`]: newly created comments

mod comment;
mod error;
mod issue;


pub use error::TriageError;

use std::error::Error as StdError;
use tracing::{debug, info};

use crate::config::{Configuration, RepoConfig};
use crate::effects::{TrackerEffect, TrackerInterpreter, TrackerResponse};
use crate::labels::{DECISION_LABEL, TypeLabels, filter_to_catalog};
use crate::signals::Vocabulary;
use crate::template::{load_template, render_decision_notice};
use crate::types::{IssueContext, LabelSet, RepoId};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Routes tracker events through the triage pipeline.
pub struct Router<T> {
    tracker: T,
    config: Configuration,
    vocabulary: Vocabulary,
    type_labels: TypeLabels,
    /// Comments by this login are ignored.
    bot_login: String,
}

impl<T> Router<T>
where
    T: TrackerInterpreter,
    T::Error: Into<BoxError>,
{
    /// Creates a router with the default vocabulary and type labels.
    pub fn new(tracker: T, config: Configuration, bot_login: impl Into<String>) -> Self {
        Router {
            tracker,
            config,
            vocabulary: Vocabulary::default(),
            type_labels: TypeLabels::default(),
            bot_login: bot_login.into(),
        }
    }

    /// Creates a router, asking the tracker who the bot is.
    pub async fn connect(tracker: T, config: Configuration) -> Result<Self, TriageError> {
        let effect = TrackerEffect::GetBotIdentity;
        let kind = effect.kind();
        match execute(&tracker, effect).await? {
            TrackerResponse::Identity { login } => {
                info!(bot_login = %login, "resolved bot identity");
                Ok(Self::new(tracker, config, login))
            }
            response => Err(TriageError::UnexpectedResponse {
                effect: kind,
                response,
            }),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_type_labels(mut self, type_labels: TypeLabels) -> Self {
        self.type_labels = type_labels;
        self
    }

    pub fn bot_login(&self) -> &str {
        &self.bot_login
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    fn config_for(&self, repo: &RepoId) -> Result<&RepoConfig, TriageError> {
        Ok(self.config.config_for(repo)?)
    }

    // ─── Tracker Calls ────────────────────────────────────────────────────────

    /// Runs an effect that only has to succeed.
    async fn run(&self, effect: TrackerEffect) -> Result<(), TriageError> {
        let kind = effect.kind();
        match execute(&self.tracker, effect).await? {
            TrackerResponse::Done => Ok(()),
            response => Err(TriageError::UnexpectedResponse {
                effect: kind,
                response,
            }),
        }
    }

    async fn post_comment(&self, issue: &IssueContext, body: String) -> Result<(), TriageError> {
        self.run(TrackerEffect::PostComment {
            repo: issue.repo.clone(),
            number: issue.number,
            body,
        })
        .await?;

        info!(repo = %issue.repo, issue = %issue.number, "posted comment");
        Ok(())
    }

    async fn repo_labels(&self, repo: &RepoId) -> Result<LabelSet, TriageError> {
        let effect = TrackerEffect::ListRepoLabels { repo: repo.clone() };
        let kind = effect.kind();
        match execute(&self.tracker, effect).await? {
            TrackerResponse::Labels(catalog) => Ok(catalog),
            response => Err(TriageError::UnexpectedResponse {
                effect: kind,
                response,
            }),
        }
    }

    /// Applies the catalog-accepted part of `proposed`.
    ///
    /// Only labels missing from the issue are sent; nothing is sent when
    /// that delta is empty.
    async fn apply_labels(
        &self,
        issue: &IssueContext,
        proposed: &LabelSet,
        catalog: &LabelSet,
    ) -> Result<(), TriageError> {
        let accepted = filter_to_catalog(proposed, catalog);

        let dropped: Vec<&String> = proposed.difference(&accepted).collect();
        if !dropped.is_empty() {
            debug!(
                repo = %issue.repo,
                issue = %issue.number,
                ?dropped,
                "dropping labels unknown to the repository"
            );
        }

        let delta: Vec<String> = accepted
            .difference(&issue.existing_labels)
            .cloned()
            .collect();
        if delta.is_empty() {
            debug!(repo = %issue.repo, issue = %issue.number, "no new labels to apply");
            return Ok(());
        }

        self.run(TrackerEffect::ApplyLabels {
            repo: issue.repo.clone(),
            number: issue.number,
            labels: delta.clone(),
        })
        .await?;

        info!(repo = %issue.repo, issue = %issue.number, labels = ?delta, "applied labels");
        Ok(())
    }

    /// Assigns `resolved` unless it is empty or already the assignee.
    async fn assign(&self, issue: &IssueContext, resolved: Option<&str>) -> Result<(), TriageError> {
        let Some(login) = resolved.filter(|l| !l.is_empty()) else {
            debug!(repo = %issue.repo, issue = %issue.number, "no assignee resolved");
            return Ok(());
        };

        if issue.current_assignee.as_deref() == Some(login) {
            return Ok(());
        }

        self.run(TrackerEffect::SetAssignee {
            repo: issue.repo.clone(),
            number: issue.number,
            login: login.to_string(),
        })
        .await?;

        info!(repo = %issue.repo, issue = %issue.number, assignee = login, "set assignee");
        Ok(())
    }

    /// Posts the decision notice if `labels` carries the decision label.
    async fn notify_decision(
        &self,
        config: &RepoConfig,
        issue: &IssueContext,
        labels: &LabelSet,
        assignee: Option<&str>,
    ) -> Result<(), TriageError> {
        if !labels.contains(DECISION_LABEL) {
            return Ok(());
        }

        let template = load_template(&config.decision_tpl_path)?;
        let body = render_decision_notice(&template, &issue.author, assignee);
        self.post_comment(issue, body).await
    }
}

async fn execute<T>(tracker: &T, effect: TrackerEffect) -> Result<TrackerResponse, TriageError>
where
    T: TrackerInterpreter,
    T::Error: Into<BoxError>,
{
    let kind = effect.kind();
    debug!(?effect, "executing tracker effect");

    tracker
        .interpret(effect)
        .await
        .map_err(|e| TriageError::Transport {
            effect: kind,
            source: e.into(),
        })
}
