pub mod dirs;
pub mod format;
pub mod list;
pub mod scan;

use clap::{Parser, Subcommand};
use hfcache_core::SortKey;

#[derive(Parser)]
#[command(
    name = "hfcache",
    about = "Inventory of locally cached Hugging Face models and datasets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List assets from every configured cache directory
    List {
        /// Sort by size, date or name
        #[arg(long, default_value = "size")]
        sort: SortKey,
        /// Print assets as JSON
        #[arg(long)]
        json: bool,
    },
    /// Test-scan a single directory
    Scan {
        /// Directory to scan
        path: String,
        /// How many assets to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Show or change the directories that get scanned
    Dirs {
        #[command(subcommand)]
        command: Option<DirsCommands>,
    },
}

#[derive(Subcommand)]
pub enum DirsCommands {
    /// Add a directory (the current directory if omitted)
    Add {
        /// Directory path
        path: Option<String>,
        /// Don't warn when it doesn't look like a cache directory
        #[arg(short, long)]
        force: bool,
    },
    /// Remove a configured directory
    Remove {
        /// Directory path as configured
        path: String,
    },
    /// Turn scanning of the default cache on or off
    ToggleDefault,
    /// Check whether a directory looks like a cache directory
    Validate {
        /// Directory path
        path: String,
    },
}
