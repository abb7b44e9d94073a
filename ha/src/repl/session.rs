//! REPL session management

use std::io::{self, Write};

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::state::{AppState, SendOutcome};
use crate::view;

/// Interactive chat session over an [`AppState`]
pub struct ChatRepl {
    state: AppState,
}

impl ChatRepl {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial_message: Option<String>) -> Result<()> {
        debug!(has_initial = initial_message.is_some(), "ChatRepl::run: called");
        self.print_welcome();

        if let Some(message) = initial_message {
            println!("{} {}", ">".bright_green(), message);
            self.send(&message).await;
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            match rl.readline(&format!("{} ", ">".bright_green())) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.send(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        info!(messages = self.state.conversation().len(), "REPL session ended");
        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "HALFART".bright_cyan().bold());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
        if let Some(greeting) = self.state.conversation().last() {
            println!("{}", view::render_message(greeting));
            println!();
        }
    }

    /// Send a message and show what came back
    async fn send(&mut self, text: &str) {
        print!("{}", view::LOADING.dimmed());
        let _ = io::stdout().flush();

        let outcome = self.state.send_message(text).await;

        // Clear the loading line
        print!("\r{}\r", " ".repeat(view::LOADING.len()));
        let _ = io::stdout().flush();

        if let Some(reply) = self.state.conversation().last() {
            println!("{}", view::render_message(reply));
        }

        if let SendOutcome::Applied(summary) = outcome {
            if summary.suggestions.is_some() {
                println!();
                println!("{}", view::render_suggestions(self.state.suggestions(), self.state.plan()));
            }
            if !summary.plan_fields.is_empty() {
                println!();
                println!("{}", view::render_itinerary(self.state.plan()));
            }
            if !summary.profile_fields.is_empty() {
                println!();
                println!("{} {}", "Profile updated:".dimmed(), summary.profile_fields.join(", "));
            }
            if !summary.rejected.is_empty() {
                println!("{} {}", "Ignored malformed:".yellow(), summary.rejected.join(", "));
            }
        }
        println!();
    }

    async fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        debug!(%input, "ChatRepl::handle_slash_command: called");
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => self.print_help(),
            "/quit" | "/q" | "/exit" => return SlashResult::Quit,
            "/suggest" | "/s" => {
                println!();
                println!("{}", view::render_suggestions(self.state.suggestions(), self.state.plan()));
                println!();
            }
            "/plan" | "/p" => {
                println!();
                println!("{}", view::render_itinerary(self.state.plan()));
                println!();
            }
            "/profile" => {
                println!();
                println!("{}", view::render_profile(self.state.profile()));
                println!();
            }
            "/toggle" | "/t" => match parts.get(1) {
                Some(id) => {
                    if self.state.toggle_selection(id) {
                        println!("{} Added {} to plan", "✓".green(), id);
                    } else {
                        println!("{} Removed {} from plan", "✓".green(), id);
                    }
                    if !self.state.suggestions().iter().any(|g| g.id == *id) {
                        println!("{}", format!("{} is not in the current suggestions", id).dimmed());
                    }
                }
                None => println!("{} Usage: /toggle <gallery-id>", "?".yellow()),
            },
            "/recalc" | "/r" => {
                println!("{} {}", ">".bright_green(), crate::state::RECALC_PROMPT);
                self.send(crate::state::RECALC_PROMPT).await;
            }
            "/save" => {
                println!("{} {}", ">".bright_green(), crate::state::SAVE_PROMPT);
                self.send(crate::state::SAVE_PROMPT).await;
            }
            "/history" => {
                println!();
                println!("{}", "Conversation History:".bright_cyan());
                println!("{}", view::render_history(self.state.conversation(), 50));
                println!();
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        SlashResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:18} Show this help", "/help".yellow());
        println!("  {:18} Show suggested galleries", "/suggest".yellow());
        println!("  {:18} Show the current plan", "/plan".yellow());
        println!("  {:18} Show your profile", "/profile".yellow());
        println!("  {:18} Add or remove a gallery", "/toggle <id>".yellow());
        println!("  {:18} Ask for a new route", "/recalc".yellow());
        println!("  {:18} Save the plan to your profile", "/save".yellow());
        println!("  {:18} Show conversation history", "/history".yellow());
        println!("  {:18} Exit", "/quit".yellow());
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
