use chrono::{DateTime, Local, Utc};
use console::style;
use hfcache_core::{Asset, AssetKind, ScanWarning};

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{bytes}B")
    }
}

pub fn format_date(when: DateTime<Utc>) -> String {
    when.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn print_asset(asset: &Asset) {
    let kind = match asset.kind {
        AssetKind::Model => style(asset.kind.as_str()).cyan(),
        AssetKind::Dataset => style(asset.kind.as_str()).magenta(),
    };
    let root = asset
        .source_root
        .as_ref()
        .map(|r| r.display().to_string())
        .unwrap_or_default();
    println!(
        "{} [{}] {} {} {}",
        style(&asset.name).bold(),
        kind,
        format_size(asset.size_bytes),
        style(format_date(asset.modified_at)).dim(),
        style(root).dim()
    );
}

/// Duplicates are expected across roots, so they are only counted.
pub fn print_warnings(warnings: &[ScanWarning]) {
    let mut duplicates = 0;
    for warning in warnings {
        if matches!(warning, ScanWarning::DuplicateSkipped { .. }) {
            duplicates += 1;
        } else {
            eprintln!("{} {warning}", style("warning:").yellow());
        }
    }
    if duplicates > 0 {
        eprintln!(
            "{}",
            style(format!("Skipped {duplicates} duplicate asset(s)")).dim()
        );
    }
}
