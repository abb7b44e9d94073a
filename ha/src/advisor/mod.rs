//! Remote advisor
//!
//! Wraps the LLM session, injects the plan/profile context into each turn,
//! and splits replies into display text and a structured payload. The
//! advisor never touches app state; reconciliation happens in `state`.

mod payload;
mod session;

pub use payload::{AdvisorPayload, AdvisorReply, PayloadError, decode_payload, parse_reply};
pub use session::AdvisorSession;
pub(crate) use session::log_failure;

/// Reply shown when the advisor cannot be reached
pub const APOLOGY: &str = "I'm having trouble connecting to the art world right now. Please try again.";

/// Message appended when applying a reply fails
pub const RECONCILE_ERROR: &str = "I encountered an error trying to fetch gallery data. Please try again.";
