//! HTTP server for the triage bot.
//!
//! # Endpoints
//!
//! - `POST /webhook` - Accepts signed tracker webhook deliveries and routes them
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

use crate::effects::TrackerInterpreter;
use crate::router::Router;
use crate::webhooks::WebhookSecret;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
pub struct AppState<T> {
    inner: Arc<AppStateInner<T>>,
}

struct AppStateInner<T> {
    router: Router<T>,

    /// Secret for HMAC-SHA256 signature verification.
    webhook_secret: WebhookSecret,
}

// Derived Clone would demand `T: Clone`; only the Arc is cloned.
impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> AppState<T> {
    pub fn new(router: Router<T>, webhook_secret: WebhookSecret) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                router,
                webhook_secret,
            }),
        }
    }

    pub fn router(&self) -> &Router<T> {
        &self.inner.router
    }

    pub fn webhook_secret(&self) -> &WebhookSecret {
        &self.inner.webhook_secret
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router<T>(app_state: AppState<T>) -> axum::Router
where
    T: TrackerInterpreter + Send + Sync + 'static,
    T::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler::<T>))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
