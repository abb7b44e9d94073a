//! CLI command definitions and subcommands

use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;

/// HALFART - NYC art companion
#[derive(Parser)]
#[command(
    name = "ha",
    about = "Chat-driven gallery suggestions and walking routes",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to chat)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive chat
    Chat {
        /// First message to send
        message: Option<String>,
    },

    /// Send one message and print the reply, suggestions and plan
    Ask {
        /// Message to send
        message: String,
    },

    /// Inspect or reset the saved profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Print the saved profile
    Show {
        /// Print raw JSON instead of the formatted panel
        #[arg(long)]
        json: bool,
    },

    /// Delete the saved profile
    Reset,

    /// Print the profile file path
    Path,
}

/// Log file location under a data directory
pub fn log_path(data_dir: &Path) -> PathBuf {
    let path = data_dir.join("logs").join("halfart.log");
    debug!(?path, "log_path: returning path");
    path
}

/// Find `--config` before the real parse, so help can describe that config
///
/// Parse errors and help/version flags are ignored here; the real parse
/// reports them.
pub fn preparse_config_path<I, T>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    debug!("preparse_config_path: called");
    let matches = Cli::command()
        .disable_help_flag(true)
        .disable_version_flag(true)
        .ignore_errors(true)
        .try_get_matches_from(args)
        .ok()?;
    matches.get_one::<PathBuf>("config").cloned()
}

/// Generate the after_help text with credential status and log path
pub fn generate_after_help(config: &Config) -> String {
    debug!("generate_after_help: called");
    let llm = &config.llm;
    let mut help = String::new();

    help.push_str("Advisor:\n");
    let icon = if llm.get_api_key().is_ok() {
        debug!("generate_after_help: api key present");
        "\u{2705}"
    } else {
        debug!("generate_after_help: api key missing");
        "\u{274C}"
    };
    help.push_str(&format!("  {} {:<16} {}\n", icon, llm.api_key_env, llm.model));

    help.push('\n');
    help.push_str(&format!(
        "Logs are written to: {}\n",
        log_path(&config.storage.data_dir).display()
    ));
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_no_subcommand() {
        let cli = Cli::try_parse_from(["ha"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_chat_with_message() {
        let cli = Cli::try_parse_from(["ha", "-l", "debug", "chat", "Chelsea this afternoon"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Some(Command::Chat { message }) => assert_eq!(message.as_deref(), Some("Chelsea this afternoon")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_profile_subcommands() {
        let cli = Cli::try_parse_from(["ha", "profile", "show", "--json", "--config", "x.yml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.yml")));
        assert!(matches!(
            cli.command,
            Some(Command::Profile {
                command: ProfileCommand::Show { json: true }
            })
        ));
    }

    #[test]
    fn test_ask_requires_message() {
        assert!(Cli::try_parse_from(["ha", "ask"]).is_err());
    }

    #[test]
    fn test_after_help_uses_config_data_dir() {
        let mut config = Config::default();
        config.storage.data_dir = PathBuf::from("/srv/halfart-data");
        config.llm.api_key_env = "HALFART_TEST_UNSET_KEY".to_string();

        let help = generate_after_help(&config);
        let expected = log_path(Path::new("/srv/halfart-data"));
        assert!(help.contains(&expected.display().to_string()));
        assert!(help.contains("HALFART_TEST_UNSET_KEY"));
    }

    #[test]
    fn test_log_path_under_data_dir() {
        assert_eq!(
            log_path(Path::new("/data")),
            PathBuf::from("/data").join("logs").join("halfart.log")
        );
    }

    #[test]
    fn test_preparse_config_path() {
        assert_eq!(
            preparse_config_path(["ha", "--config", "custom.yml", "--help"]),
            Some(PathBuf::from("custom.yml"))
        );
        assert_eq!(
            preparse_config_path(["ha", "profile", "show", "-c", "nested.yml"]),
            Some(PathBuf::from("nested.yml"))
        );
        assert_eq!(preparse_config_path(["ha", "--help"]), None);
    }
}
