//! Triage Bot - a rule-based issue triage bot.
//!
//! New issues and comments are scanned for trigger words and `//label` tags,
//! which are turned into labels, a mentor assignee and templated replies.

pub mod assign;
pub mod config;
pub mod effects;
pub mod github;
pub mod labels;
pub mod mentors;
pub mod router;
pub mod server;
pub mod signals;
pub mod template;
pub mod types;
pub mod webhooks;
