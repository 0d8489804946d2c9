use std::fs;
use std::path::Path;

use crate::asset::{DATASET_PREFIX, MODEL_PREFIX};
use crate::scanner::BLOBS_DIR;

/// Advisory check for whether `path` holds hub-style cache entries.
///
/// True when a child directory is named `models--*` or `datasets--*`, when a
/// child directory has its own `blobs/`, or when `path` itself has `blobs/`
/// (it is a single asset rather than a root). Never used to refuse a path.
pub fn looks_like_cache_root(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }

    let Ok(entries) = fs::read_dir(path) else {
        tracing::debug!("Could not list {} while probing", path.display());
        return false;
    };

    for entry in entries.flatten() {
        let child = entry.path();
        if !child.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(MODEL_PREFIX) || name.starts_with(DATASET_PREFIX) {
            return true;
        }
        if child.join(BLOBS_DIR).exists() {
            return true;
        }
    }

    path.join(BLOBS_DIR).exists()
}
