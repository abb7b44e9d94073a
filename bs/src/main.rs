use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use blobstore::BlobStore;
use blobstore::cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let store_dir = cli.store_dir();
    let store = BlobStore::open(&store_dir).context(format!("Failed to open store at {}", store_dir.display()))?;

    info!("blobstore opened at {}", store_dir.display());

    match cli.command {
        Command::Get { key, pretty } => match store.get(&key)? {
            Some(value) => {
                let shown = if pretty {
                    serde_json::from_str::<serde_json::Value>(&value)
                        .and_then(|v| serde_json::to_string_pretty(&v))
                        .unwrap_or(value)
                } else {
                    value
                };
                println!("{}", shown);
            }
            None => {
                println!("{} No value for key: {}", "✗".red(), key.cyan());
            }
        },
        Command::Put { key, value } => {
            store.put(&key, &value)?;
            println!("{} Stored key: {}", "✓".green(), key.cyan());
        }
        Command::List => {
            let keys = store.keys()?;
            if keys.is_empty() {
                println!("No keys found");
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
        Command::Delete { key } => {
            if store.remove(&key)? {
                println!("{} Deleted key: {}", "✓".green(), key);
            } else {
                println!("{} No value for key: {}", "✗".red(), key);
            }
        }
    }

    Ok(())
}
