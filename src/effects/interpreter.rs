//! Effect interpreter trait.

use std::future::Future;

use super::tracker::{TrackerEffect, TrackerResponse};

/// Interprets tracker effects against a real or simulated issue tracker.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct Recorder {
///     calls: Mutex<Vec<TrackerEffect>>,
/// }
///
/// impl TrackerInterpreter for Recorder {
///     type Error = String;
///
///     async fn interpret(&self, effect: TrackerEffect) -> Result<TrackerResponse, Self::Error> {
///         self.calls.lock().unwrap().push(effect);
///         Ok(TrackerResponse::Done)
///     }
/// }
/// ```
pub trait TrackerInterpreter {
    /// The error type returned by this interpreter.
    type Error;

    /// Execute a tracker effect and return its response.
    fn interpret(
        &self,
        effect: TrackerEffect,
    ) -> impl Future<Output = Result<TrackerResponse, Self::Error>> + Send;
}
