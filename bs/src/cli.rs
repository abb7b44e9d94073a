//! CLI argument parsing for blobstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bs")]
#[command(author, version, about = "Inspect keyed JSON blobs", long_about = None)]
pub struct Cli {
    /// Store directory (default: <data-local-dir>/halfart)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve the store directory, falling back to the default location
    pub fn store_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_store_dir)
    }
}

/// Default store directory shared with the halfart client
pub fn default_store_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("halfart")
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored under a key
    Get {
        /// Key to read
        #[arg(required = true)]
        key: String,

        /// Pretty-print the value if it is JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Store a value under a key
    Put {
        /// Key to write
        #[arg(required = true)]
        key: String,

        /// Value to store
        #[arg(required = true)]
        value: String,
    },

    /// List stored keys
    List,

    /// Delete a key
    Delete {
        /// Key to delete
        #[arg(required = true)]
        key: String,
    },
}
