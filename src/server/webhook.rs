//! Webhook endpoint handler.
//!
//! Deliveries are verified, parsed and routed synchronously: the response is
//! sent only after the router has finished with the event, so a failure is
//! visible to the sender as a 500 and can be redelivered.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::effects::TrackerInterpreter;
use crate::router::TriageError;
use crate::types::DeliveryId;
use crate::webhooks::{ParseError, TrackerEvent, parse_webhook};

/// Header name for the event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for the delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";
/// Header name for the payload signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid payload: {0}")]
    Parse(#[from] ParseError),

    #[error("triage failed: {0}")]
    Triage(#[from] TriageError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::Parse(_) => StatusCode::BAD_REQUEST,
            WebhookError::Triage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Response
///
/// - 200 OK: event routed
/// - 202 Accepted: event type or delivery the bot does not act on
/// - 400 Bad Request: missing header or malformed payload
/// - 401 Unauthorized: invalid signature
/// - 500 Internal Server Error: routing failed
pub async fn webhook_handler<T>(
    State(app_state): State<AppState<T>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError>
where
    T: TrackerInterpreter + Send + Sync + 'static,
    T::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let event_type = get_header(&headers, HEADER_EVENT)?;
    let delivery_id = DeliveryId::new(get_header(&headers, HEADER_DELIVERY)?);
    let signature_header = get_header(&headers, HEADER_SIGNATURE)?;

    debug!(delivery_id = %delivery_id, event_type = %event_type, "Received webhook");

    // Nothing is parsed until the signature checks out.
    if !app_state.webhook_secret().verify(&body, &signature_header) {
        warn!(delivery_id = %delivery_id, "Invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    let Some(event) = parse_webhook(&event_type, &body)? else {
        debug!(delivery_id = %delivery_id, event_type = %event_type, "Ignoring webhook");
        return Ok((StatusCode::ACCEPTED, "Ignored"));
    };

    let repo = event.repo_id().clone();
    let result = match &event {
        TrackerEvent::Issue(issue) => app_state.router().handle_issue(issue).await,
        TrackerEvent::Comment(comment) => app_state.router().handle_comment(comment).await,
    };

    match result {
        Ok(()) => {
            info!(delivery_id = %delivery_id, repo = %repo, event_type = %event_type, "Webhook handled");
            Ok((StatusCode::OK, "OK"))
        }
        Err(e) => {
            warn!(delivery_id = %delivery_id, repo = %repo, error = %e, "Webhook handling failed");
            Err(WebhookError::Triage(e))
        }
    }
}

/// Extracts a required header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .ok_or(WebhookError::MissingHeader(name))
}
