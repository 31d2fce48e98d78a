//! Effects-as-data for the issue tracker.
//!
//! The router never talks to the tracker directly. It builds a
//! [`TrackerEffect`] describing the call and hands it to a
//! [`TrackerInterpreter`]. This keeps the routing logic testable against a
//! recording mock and gives a single place to log every outbound call.

pub mod interpreter;
pub mod tracker;

pub use interpreter::TrackerInterpreter;
pub use tracker::{TrackerEffect, TrackerResponse};
