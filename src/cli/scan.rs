use anyhow::{Context, Result};
use console::style;
use hfcache_core::config::expand_home;

use super::format::{format_size, print_warnings};

pub fn run(path: &str, limit: usize) -> Result<()> {
    let root = expand_home(path);
    let report = hfcache_core::scan(&root)
        .with_context(|| format!("error scanning directory {}", root.display()))?;
    print_warnings(&report.warnings);

    if report.assets.is_empty() {
        eprintln!("No Hugging Face assets found in {}", root.display());
        return Ok(());
    }

    println!("Found {} assets:", report.assets.len());
    for asset in report.assets.iter().take(limit) {
        println!(
            "  • {} ({})",
            style(&asset.name).bold(),
            format_size(asset.size_bytes)
        );
    }
    if report.assets.len() > limit {
        println!("  ... and {} more", report.assets.len() - limit);
    }
    Ok(())
}
