use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::asset::Asset;
use crate::warning::ScanWarning;
use crate::{Error, Result};

/// Subdirectory of an asset that holds the stored file content.
pub const BLOBS_DIR: &str = "blobs";

/// Assets found by a scan plus everything that was skipped along the way.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub assets: Vec<Asset>,
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    pub(crate) fn warn(&mut self, warning: ScanWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}

enum Candidate {
    Found(Asset),
    Empty,
    Skipped(ScanWarning),
}

/// Scan one cache root for assets.
///
/// Each immediate subdirectory is a candidate. Its size is the sum of the
/// regular files directly inside its `blobs/` directory, and it is only
/// reported when that sum is non-zero. Problems with single blobs or
/// candidates land in [`ScanReport::warnings`]; only a missing, non-directory
/// or unreadable root fails the call.
///
/// Assets come back in directory enumeration order.
pub fn scan(root: &Path) -> Result<ScanReport> {
    let root = resolve_root(root)?;
    tracing::info!("Scanning cache directory: {}", root.display());

    let entries = fs::read_dir(&root).map_err(|e| {
        tracing::error!("Error reading cache directory {}: {e}", root.display());
        Error::io(&root, e)
    })?;

    let mut report = ScanReport::default();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        match scan_candidate(&path, entry.file_name(), &mut report) {
            Candidate::Found(asset) => report.assets.push(asset),
            Candidate::Empty => {}
            Candidate::Skipped(warning) => report.warn(warning),
        }
    }

    tracing::info!("Found {} assets in cache", report.assets.len());
    Ok(report)
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::error!("Cache directory does not exist: {}", root.display());
            return Err(Error::NotFound(root.to_path_buf()));
        }
        Err(e) => return Err(Error::io(root, e)),
    };

    if !meta.is_dir() {
        tracing::error!("Cache path is not a directory: {}", root.display());
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    fs::canonicalize(root).map_err(|e| Error::io(root, e))
}

fn scan_candidate(path: &Path, file_name: OsString, report: &mut ScanReport) -> Candidate {
    let Ok(name) = file_name.into_string() else {
        return Candidate::Skipped(ScanWarning::CandidateSkipped {
            path: path.to_path_buf(),
            message: "directory name is not valid UTF-8".to_string(),
        });
    };

    let blobs = path.join(BLOBS_DIR);
    match fs::metadata(&blobs) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Candidate::Empty,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Candidate::Empty,
        Err(e) => {
            return Candidate::Skipped(ScanWarning::CandidateSkipped {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    }

    let size = match blob_size(&blobs, report) {
        Ok(size) => size,
        Err(e) => {
            return Candidate::Skipped(ScanWarning::BlobsUnreadable {
                asset: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };

    if size == 0 {
        return Candidate::Empty;
    }

    let canonical = match fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(e) => {
            return Candidate::Skipped(ScanWarning::CandidateSkipped {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };

    let modified = fs::metadata(path).and_then(|meta| meta.modified());
    let modified_at = modified_or_now(path, modified, report);
    Candidate::Found(Asset::new(name, size, modified_at, canonical))
}

/// Not recursive: nested directories inside `blobs/` are ignored.
fn blob_size(blobs: &Path, report: &mut ScanReport) -> io::Result<u64> {
    let mut size = 0;
    for entry in fs::read_dir(blobs)? {
        let blob = entry?.path();
        match fs::metadata(&blob) {
            Ok(meta) if meta.is_file() => size += meta.len(),
            Ok(_) => {}
            Err(e) => report.warn(ScanWarning::BlobUnreadable {
                blob,
                message: e.to_string(),
            }),
        }
    }
    Ok(size)
}

fn modified_or_now(
    path: &Path,
    modified: io::Result<SystemTime>,
    report: &mut ScanReport,
) -> DateTime<Utc> {
    match modified {
        Ok(time) => DateTime::<Utc>::from(time),
        Err(e) => {
            report.warn(ScanWarning::ModifiedTimeFallback {
                asset: path.to_path_buf(),
                message: e.to_string(),
            });
            Utc::now()
        }
    }
}
