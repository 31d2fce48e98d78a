//! Tracker effect interpreter using octocrab.

use crate::effects::{TrackerEffect, TrackerInterpreter, TrackerResponse};
use crate::types::{IssueNumber, LabelSet, RepoId};

use super::client::OctocrabClient;
use super::error::GitHubApiError;

/// Page size used for every paginated listing.
const PER_PAGE: u8 = 100;

impl TrackerInterpreter for OctocrabClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: TrackerEffect) -> Result<TrackerResponse, Self::Error> {
        interpret_tracker_effect(self, effect).await
    }
}

/// Executes a tracker effect against the GitHub API.
pub async fn interpret_tracker_effect(
    client: &OctocrabClient,
    effect: TrackerEffect,
) -> Result<TrackerResponse, GitHubApiError> {
    let kind = effect.kind();
    let result = match effect {
        TrackerEffect::PostComment { repo, number, body } => {
            post_comment(client, &repo, number, body).await
        }
        TrackerEffect::ApplyLabels {
            repo,
            number,
            labels,
        } => apply_labels(client, &repo, number, labels).await,
        TrackerEffect::SetAssignee {
            repo,
            number,
            login,
        } => set_assignee(client, &repo, number, &login).await,
        TrackerEffect::ListRepoLabels { repo } => list_repo_labels(client, &repo).await,
        TrackerEffect::GetBotIdentity => get_bot_identity(client).await,
    };

    if let Err(e) = &result {
        if e.is_server_side() {
            tracing::warn!(effect = kind, error = %e, "GitHub API call failed server-side");
        } else {
            tracing::debug!(effect = kind, error = %e, "GitHub API call failed");
        }
    }

    result
}

// ─── Issue Mutations ──────────────────────────────────────────────────────────

async fn post_comment(
    client: &OctocrabClient,
    repo: &RepoId,
    number: IssueNumber,
    body: String,
) -> Result<TrackerResponse, GitHubApiError> {
    client
        .inner()
        .issues(&repo.owner, &repo.repo)
        .create_comment(number.0, body)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(TrackerResponse::Done)
}

async fn apply_labels(
    client: &OctocrabClient,
    repo: &RepoId,
    number: IssueNumber,
    labels: Vec<String>,
) -> Result<TrackerResponse, GitHubApiError> {
    client
        .inner()
        .issues(&repo.owner, &repo.repo)
        .add_labels(number.0, &labels)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(TrackerResponse::Done)
}

async fn set_assignee(
    client: &OctocrabClient,
    repo: &RepoId,
    number: IssueNumber,
    login: &str,
) -> Result<TrackerResponse, GitHubApiError> {
    client
        .inner()
        .issues(&repo.owner, &repo.repo)
        .add_assignees(number.0, &[login])
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(TrackerResponse::Done)
}

// ─── Queries ──────────────────────────────────────────────────────────────────

async fn list_repo_labels(
    client: &OctocrabClient,
    repo: &RepoId,
) -> Result<TrackerResponse, GitHubApiError> {
    let mut page = 1u32;
    let mut catalog = LabelSet::new();

    loop {
        let result = client
            .inner()
            .issues(&repo.owner, &repo.repo)
            .list_labels_for_repo()
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await;

        match result {
            Ok(page_result) => {
                let items = page_result.items;
                let is_last_page = items.len() < usize::from(PER_PAGE);

                catalog.extend(items.into_iter().map(|label| label.name));

                if is_last_page {
                    break;
                }
                page += 1;
            }
            Err(e) => return Err(GitHubApiError::from_octocrab(e)),
        }
    }

    Ok(TrackerResponse::Labels(catalog))
}

async fn get_bot_identity(client: &OctocrabClient) -> Result<TrackerResponse, GitHubApiError> {
    let user = client
        .inner()
        .current()
        .user()
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    if user.login.is_empty() {
        return Err(GitHubApiError::without_source(
            "authenticated user has an empty login",
        ));
    }

    Ok(TrackerResponse::Identity { login: user.login })
}
