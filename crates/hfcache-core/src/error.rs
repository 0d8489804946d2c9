use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cache directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Cache path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid directory {path}: {reason}")]
    InvalidDirectory { path: PathBuf, reason: &'static str },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the root-level "nothing usable there" conditions.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotADirectory(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
