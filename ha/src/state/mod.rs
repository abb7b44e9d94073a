//! Application state
//!
//! One owner for the conversation, suggestions, plan and profile. Views read
//! from it; only reconciliation and local toggles write to it.

mod app;
mod persistence;

pub use app::{AppState, RECALC_PROMPT, ReconcileSummary, SAVE_PROMPT, SendOutcome, SessionFactory};
pub use persistence::ProfileStore;
