//! GitHub API error types.

use std::fmt;
use thiserror::Error;

/// A failed GitHub API call.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// The HTTP status code, if one could be recovered.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Wraps an octocrab error.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let message = err.to_string();
        Self {
            status_code: status_from_message(&message),
            message,
            source: Some(err),
        }
    }

    /// Creates an error without an octocrab source.
    pub fn without_source(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for 5xx and rate-limit responses.
    ///
    /// Nothing retries on this; it only decides the log level.
    pub fn is_server_side(&self) -> bool {
        matches!(self.status_code, Some(429) | Some(500..=599))
    }
}

/// Recovers an HTTP status code from an octocrab error message.
///
/// octocrab does not expose a stable status accessor across its error
/// variants, so this falls back to `None` when nothing recognisable is found.
fn status_from_message(err_str: &str) -> Option<u16> {
    if let Some(idx) = err_str.find("status: ") {
        let rest = &err_str[idx + 8..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Ok(code) = digits.parse() {
            return Some(code);
        }
    }

    let lower = err_str.to_lowercase();
    if err_str.contains("404") && lower.contains("not found") {
        return Some(404);
    }

    [422, 403, 401, 429, 500, 502, 503]
        .into_iter()
        .find(|code| err_str.contains(&code.to_string()))
}
