//! Error types for staging operations.

use crate::report::BuildReport;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while staging or packaging a bundle.
#[derive(Debug, Error)]
pub enum StageError {
    /// The source root does not exist or is not a directory.
    #[error("Source root not found: {}", .0.display())]
    SourceRootNotFound(PathBuf),

    /// The destination root could not be created.
    #[error("Destination root not writable: {}: {source}", .path.display())]
    DestRootNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required artifact was absent from the source tree.
    #[error("Required artifact missing for {action}: {}", .path.display())]
    RequiredArtifactMissing { action: String, path: PathBuf },

    /// A required artifact was present but could not be copied.
    #[error("Failed to copy required artifact {action}: {source}")]
    RequiredCopyFailed {
        action: String,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be ensured.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryEnsureFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An action declaration is malformed.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// I/O error outside of a specific action.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A build that stopped before exhausting its action list.
///
/// Carries the partial report so callers can see which actions ran before
/// the abort. Files staged by those actions stay on disk.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct BuildAborted {
    pub report: BuildReport,
    #[source]
    pub error: StageError,
}

impl BuildAborted {
    pub(crate) fn new(report: BuildReport, error: StageError) -> Self {
        Self { report, error }
    }
}
