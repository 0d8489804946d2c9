use std::fmt;
use std::path::PathBuf;

/// A recoverable condition hit during a scan. The scan carried on past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// One blob could not be read; the asset size under-counts it.
    BlobUnreadable { blob: PathBuf, message: String },
    /// The blob directory could not be listed; the asset was skipped.
    BlobsUnreadable { asset: PathBuf, message: String },
    /// A candidate directory could not be processed and was skipped.
    CandidateSkipped { path: PathBuf, message: String },
    /// The asset's modification time was unreadable; "now" was used instead.
    ModifiedTimeFallback { asset: PathBuf, message: String },
    /// A whole root failed to scan during a multi-root scan.
    RootSkipped { root: PathBuf, message: String },
    /// An asset name already seen under an earlier root.
    DuplicateSkipped { name: String, root: PathBuf },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlobUnreadable { blob, message } => {
                write!(f, "skipped unreadable blob {}: {message}", blob.display())
            }
            Self::BlobsUnreadable { asset, message } => {
                write!(f, "error accessing blobs in {}: {message}", asset.display())
            }
            Self::CandidateSkipped { path, message } => {
                write!(f, "error processing {}: {message}", path.display())
            }
            Self::ModifiedTimeFallback { asset, message } => write!(
                f,
                "could not get modification time for {}: {message}",
                asset.display()
            ),
            Self::RootSkipped { root, message } => {
                write!(f, "failed to scan directory {}: {message}", root.display())
            }
            Self::DuplicateSkipped { name, root } => {
                write!(f, "skipped duplicate asset {name} from {}", root.display())
            }
        }
    }
}
