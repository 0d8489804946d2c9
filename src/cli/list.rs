use anyhow::{Context, Result};
use console::style;
use hfcache_core::{scan_all, sort_assets, ConfigStore, SortKey, Totals};

use super::format::{format_size, print_asset, print_warnings};

pub fn run(sort: SortKey, json: bool) -> Result<()> {
    let mut store = ConfigStore::open().context("failed to open configuration")?;
    let mut report = scan_all(&mut store);
    sort_assets(&mut report.assets, sort);
    print_warnings(&report.warnings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.assets)?);
        return Ok(());
    }

    if report.assets.is_empty() {
        eprintln!("No assets found");
        eprintln!("  Run 'hfcache dirs' to see which directories are scanned");
        return Ok(());
    }

    for asset in &report.assets {
        print_asset(asset);
    }

    let totals = Totals::of(&report.assets);
    println!(
        "{} {} models, {} datasets, {} total",
        style("●").green(),
        totals.models,
        totals.datasets,
        style(format_size(totals.size_bytes)).bold()
    );
    Ok(())
}
