//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Behavioral instruction for the advisor session
pub const ADVISOR: &str = include_str!("../../prompts/advisor.pmt");

/// Plan/profile summary appended to each user turn
pub const CONTEXT: &str = include_str!("../../prompts/context.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "advisor" => Some(ADVISOR),
        "context" => Some(CONTEXT),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
