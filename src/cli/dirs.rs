use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;
use hfcache_core::config::expand_home;
use hfcache_core::ConfigStore;

fn open_store() -> Result<ConfigStore> {
    ConfigStore::open().context("failed to open configuration")
}

fn marker(exists: bool) -> console::StyledObject<&'static str> {
    if exists {
        style("✓").green()
    } else {
        style("✗").red()
    }
}

pub fn run_show() -> Result<()> {
    let mut store = open_store()?;
    let include_default = store.load().include_default_cache;

    let status = if include_default {
        style("Enabled").green()
    } else {
        style("Disabled").dim()
    };
    println!("Default Hugging Face cache: {status}");
    if include_default {
        for root in store.default_roots() {
            println!("  {} {}", marker(root.exists()), root.display());
        }
    }

    let custom = store.directory_status();
    if custom.is_empty() {
        println!("{}", style("No custom directories configured").dim());
    } else {
        println!("Custom directories:");
        for (i, dir) in custom.iter().enumerate() {
            println!("  {}. {} {}", i + 1, marker(dir.exists), dir.path);
        }
    }

    eprintln!(
        "{}",
        style(format!("Config: {}", store.config_file().display())).dim()
    );
    Ok(())
}

pub fn run_add(cwd: &Path, path: Option<&str>, force: bool) -> Result<()> {
    let path = path.map_or_else(|| cwd.to_path_buf(), expand_home);
    let mut store = open_store()?;

    if path.is_dir() && !store.validate_directory(&path) && !force {
        eprintln!(
            "{} {} doesn't appear to contain Hugging Face assets",
            style("warning:").yellow(),
            path.display()
        );
    }

    if store
        .add_directory(&path)
        .context("failed to add directory")?
    {
        eprintln!("{} Added directory: {}", style("✓").green(), path.display());
    } else {
        eprintln!("Directory already configured: {}", path.display());
    }
    Ok(())
}

pub fn run_remove(path: &str) -> Result<()> {
    let mut store = open_store()?;
    let expanded = expand_home(path);
    let target = expanded.to_str().unwrap_or(path);

    if !store
        .remove_directory(target)
        .context("failed to remove directory")?
    {
        bail!("directory not configured: {path}");
    }
    eprintln!("{} Removed directory: {path}", style("✓").green());
    Ok(())
}

pub fn run_toggle() -> Result<()> {
    let mut store = open_store()?;
    let enabled = store
        .toggle_default_cache()
        .context("failed to save configuration")?;
    let state = if enabled { "enabled" } else { "disabled" };
    eprintln!("Default Hugging Face cache {state}");
    Ok(())
}

pub fn run_validate(path: &str) -> Result<()> {
    let path = expand_home(path);
    let store = open_store()?;
    if store.validate_directory(&path) {
        println!("{} looks like a Hugging Face cache directory", path.display());
    } else {
        println!(
            "{} doesn't appear to contain Hugging Face assets",
            path.display()
        );
    }
    Ok(())
}
