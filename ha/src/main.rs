//! HALFART - NYC art companion
//!
//! CLI entry point for chatting with the gallery advisor.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use halfart::cli::{Cli, Command, ProfileCommand, generate_after_help, log_path, preparse_config_path};
use halfart::config::Config;
use halfart::prompts::PromptLoader;
use halfart::state::{AppState, ProfileStore, SendOutcome};
use halfart::{repl, view};

fn setup_logging(log_file_path: &Path, cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    if let Some(log_dir) = log_file_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = match level_str.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_file_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Build command with dynamic after_help describing the config this run will use
    let config_hint = preparse_config_path(std::env::args_os());
    let help_config = Config::load(config_hint.as_ref()).unwrap_or_default();
    let cmd = Cli::command().after_help(generate_after_help(&help_config));

    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Config comes first: the log file lives under its data dir
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(
        &log_path(&config.storage.data_dir),
        cli.log_level.as_deref(),
        config.log_level.as_deref(),
    )
    .context("Failed to setup logging")?;

    info!(model = %config.llm.model, data_dir = ?config.storage.data_dir, "HALFART loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Chat { message }) => {
            debug!("main: matched Chat command");
            repl::run_interactive(&config, message).await
        }
        Some(Command::Ask { message }) => {
            debug!("main: matched Ask command");
            cmd_ask(&config, &message).await
        }
        Some(Command::Profile { command }) => {
            debug!(?command, "main: matched Profile command");
            cmd_profile(&config, command)
        }
        None => {
            debug!("main: no command specified, launching chat");
            repl::run_interactive(&config, None).await
        }
    }
}

/// Run a single round-trip and print everything it changed
async fn cmd_ask(config: &Config, message: &str) -> Result<()> {
    debug!("cmd_ask: called");
    let worktree = std::env::current_dir()?;
    let mut state = AppState::from_config(config, Arc::new(PromptLoader::new(&worktree)));

    let outcome = state.send_message(message).await;
    if let Some(reply) = state.conversation().last() {
        println!("{}", view::render_message(reply));
    }

    if let SendOutcome::Applied(summary) = &outcome {
        if summary.suggestions.is_some() {
            println!();
            println!("{}", view::render_suggestions(state.suggestions(), state.plan()));
        }
        if !summary.plan_fields.is_empty() {
            println!();
            println!("{}", view::render_itinerary(state.plan()));
        }
    }
    Ok(())
}

fn cmd_profile(config: &Config, command: ProfileCommand) -> Result<()> {
    debug!(?command, "cmd_profile: called");
    let store = ProfileStore::open(&config.storage.data_dir, config.storage.profile_key.clone())?;

    match command {
        ProfileCommand::Show { json } => {
            let profile = store.load();
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{}", view::render_profile(&profile));
            }
        }
        ProfileCommand::Reset => {
            if store.reset()? {
                println!("{} Profile reset", "✓".green());
            } else {
                println!("{} No saved profile", "✓".green());
            }
        }
        ProfileCommand::Path => {
            println!("{}", store.path()?.display());
        }
    }
    Ok(())
}
