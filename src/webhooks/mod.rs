//! Webhook handling.
//!
//! - [`signature`]: HMAC-SHA256 verification of deliveries
//! - [`events`]: typed events handed to the router
//! - [`parser`]: raw JSON to typed events

pub mod events;
pub mod parser;
pub mod signature;

pub use events::TrackerEvent;
pub use parser::{ParseError, parse_webhook};
pub use signature::{WebhookSecret, parse_signature_header};
