//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for the advisor.
//!
//! Template loading chain:
//! 1. `.halfart/prompts/{name}.pmt` in the working directory
//! 2. `~/.config/halfart/prompts/{name}.pmt`
//! 3. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{ContextSummary, PlanSummary, ProfileSummary, PromptLoader};
