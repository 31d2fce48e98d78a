//! Octocrab client wrapper.
//!
//! A single bot installation serves every configured repository, so the
//! client is not scoped to one repository. Each effect names its own.

use octocrab::Octocrab;

/// A GitHub API client shared by all repositories the bot serves.
#[derive(Clone)]
pub struct OctocrabClient {
    client: Octocrab,
}

impl OctocrabClient {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Creates a client authenticated with a personal access token.
    pub fn from_token(token: impl Into<String>) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient").finish_non_exhaustive()
    }
}
