//! GitHub API client and tracker effect interpreter.
//!
//! This module executes [`TrackerEffect`](crate::effects::TrackerEffect)s
//! against GitHub through octocrab. Failures are surfaced as
//! [`GitHubApiError`]; nothing is retried here.

mod client;
mod error;
mod interpreter;

pub use client::OctocrabClient;
pub use error::GitHubApiError;
pub use interpreter::interpret_tracker_effect;
