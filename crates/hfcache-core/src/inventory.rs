use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::ConfigStore;
use crate::scanner::{scan, ScanReport};
use crate::warning::ScanWarning;

/// Scan every root the store resolves and merge the results.
pub fn scan_all(store: &mut ConfigStore) -> ScanReport {
    let roots = store.get_all_directories();
    scan_roots(&roots)
}

/// Scan `roots` in order, tagging each asset with the root it came from.
///
/// Failing roots are skipped. Assets are deduplicated by name alone and the
/// first root to report a name wins, so root order decides which copy is
/// kept when two roots hold different assets under the same name.
pub fn scan_roots(roots: &[PathBuf]) -> ScanReport {
    tracing::info!("Scanning {} directories for assets", roots.len());

    let mut merged = ScanReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for root in roots {
        let report = match scan(root) {
            Ok(report) => report,
            Err(e) => {
                merged.warn(ScanWarning::RootSkipped {
                    root: root.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        merged.warnings.extend(report.warnings);
        for asset in report.assets {
            if seen.insert(asset.name.clone()) {
                merged.assets.push(asset.with_source_root(root.clone()));
            } else {
                tracing::debug!(
                    "Skipping duplicate asset: {} from {}",
                    asset.name,
                    root.display()
                );
                merged.warnings.push(ScanWarning::DuplicateSkipped {
                    name: asset.name,
                    root: root.clone(),
                });
            }
        }
    }

    tracing::info!(
        "Found {} unique assets across all directories",
        merged.assets.len()
    );
    merged
}
