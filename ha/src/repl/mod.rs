//! Interactive REPL for HALFART
//!
//! Reads lines with rustyline; plain text goes to the advisor, slash
//! commands drive local views and actions.

mod session;

pub use session::ChatRepl;

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::prompts::PromptLoader;
use crate::state::AppState;

/// Run the interactive REPL
///
/// This is the main entry point for `ha chat`.
pub async fn run_interactive(config: &Config, initial_message: Option<String>) -> Result<()> {
    debug!("run_interactive: called");
    // A missing key is not fatal; each turn will apologize instead
    if let Err(e) = config.validate() {
        warn!(error = %e, "Config validation failed");
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    let worktree = std::env::current_dir()?;
    let prompts = Arc::new(PromptLoader::new(&worktree));
    let state = AppState::from_config(config, prompts);

    let mut repl = ChatRepl::new(state);
    repl.run(initial_message).await
}
