//! Router error taxonomy.

use std::error::Error as StdError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::effects::TrackerResponse;
use crate::mentors::MentorError;
use crate::template::TemplateError;

/// Why handling an event stopped early.
///
/// Every variant aborts the remaining steps of the event. Side effects that
/// already happened are not rolled back.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The repository is not configured, or its configuration is unusable.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The mentor table could not be read or parsed.
    #[error("mentor table error: {0}")]
    Mentors(#[from] MentorError),

    /// A template could not be read.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A tracker call failed.
    #[error("tracker call {effect} failed: {source}")]
    Transport {
        effect: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The tracker answered with a response that does not fit the call.
    #[error("tracker answered {effect} with {response:?}")]
    UnexpectedResponse {
        effect: &'static str,
        response: TrackerResponse,
    },
}
