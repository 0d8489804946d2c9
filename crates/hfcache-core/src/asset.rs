use std::cmp::Reverse;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directory-name prefix that marks a dataset in the hub cache layout.
pub const DATASET_PREFIX: &str = "datasets--";
/// Directory-name prefix that marks a model in the hub cache layout.
pub const MODEL_PREFIX: &str = "models--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Model,
    Dataset,
}

impl AssetKind {
    /// Classifies purely by naming convention; contents are never inspected.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let prefix_len = DATASET_PREFIX.len();
        let is_dataset = name
            .get(..prefix_len)
            .is_some_and(|head| head.eq_ignore_ascii_case(DATASET_PREFIX));
        if is_dataset {
            Self::Dataset
        } else {
            Self::Model
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Dataset => "dataset",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One model or dataset entry discovered under a cache root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    pub kind: AssetKind,
    /// Canonical location; symlinked candidates resolve to their target.
    pub path: PathBuf,
    /// Set only when the asset came through a multi-root scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<PathBuf>,
}

impl Asset {
    #[must_use]
    pub fn new(name: String, size_bytes: u64, modified_at: DateTime<Utc>, path: PathBuf) -> Self {
        Self {
            kind: AssetKind::classify(&name),
            name,
            size_bytes,
            modified_at,
            path,
            source_root: None,
        }
    }

    #[must_use]
    pub fn with_source_root(mut self, root: PathBuf) -> Self {
        self.source_root = Some(root);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Size,
    Date,
    Name,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Date => "date",
            Self::Name => "name",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "size" => Ok(Self::Size),
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            _ => Err(format!("unknown sort key: {s} (expected size, date or name)")),
        }
    }
}

/// Largest and newest first; names alphabetically.
pub fn sort_assets(assets: &mut [Asset], key: SortKey) {
    match key {
        SortKey::Size => assets.sort_by_key(|a| Reverse(a.size_bytes)),
        SortKey::Date => assets.sort_by_key(|a| Reverse(a.modified_at)),
        SortKey::Name => assets.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub size_bytes: u64,
    pub models: usize,
    pub datasets: usize,
}

impl Totals {
    #[must_use]
    pub fn of(assets: &[Asset]) -> Self {
        assets.iter().fold(Self::default(), |mut acc, asset| {
            acc.size_bytes += asset.size_bytes;
            match asset.kind {
                AssetKind::Model => acc.models += 1,
                AssetKind::Dataset => acc.datasets += 1,
            }
            acc
        })
    }
}
