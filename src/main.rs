use std::env;

use anyhow::Result;
use clap::Parser;

use hfcache::cli::{Cli, Commands, DirsCommands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli.command)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::List { sort, json } => hfcache::cli::list::run(sort, json),
        Commands::Scan { path, limit } => hfcache::cli::scan::run(&path, limit),
        Commands::Dirs { command } => match command {
            Some(DirsCommands::Add { path, force }) => {
                let cwd = env::current_dir()?;
                hfcache::cli::dirs::run_add(&cwd, path.as_deref(), force)
            }
            Some(DirsCommands::Remove { path }) => hfcache::cli::dirs::run_remove(&path),
            Some(DirsCommands::ToggleDefault) => hfcache::cli::dirs::run_toggle(),
            Some(DirsCommands::Validate { path }) => hfcache::cli::dirs::run_validate(&path),
            None => hfcache::cli::dirs::run_show(),
        },
    }
}
