#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod config;
pub mod error;
pub mod inventory;
pub mod probe;
pub mod scanner;
pub mod warning;

pub use asset::{sort_assets, Asset, AssetKind, SortKey, Totals};
pub use config::{ConfigStore, Configuration, DirectoryStatus};
pub use error::{Error, Result};
pub use inventory::{scan_all, scan_roots};
pub use probe::looks_like_cache_root;
pub use scanner::{scan, ScanReport, BLOBS_DIR};
pub use warning::ScanWarning;
