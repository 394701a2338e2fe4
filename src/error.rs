//! Setup Error Types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while generating configuration or bootstrapping the database
#[derive(Error, Debug)]
pub enum SetupError {
    /// Filesystem error on a specific path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed legacy INI configuration
    #[error("Failed to parse {} (line {line}): {reason}", .path.display())]
    ConfigParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Transport error or non-success HTTP status while downloading
    #[error("Download of {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Expected database file was not produced by archive extraction
    #[error("Archive {archive} did not contain {member}")]
    MissingArchiveMember { archive: String, member: String },

    /// Blocking extraction task failed to complete
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Home directory could not be determined for path resolution
    #[error("Unable to determine the user's home directory")]
    HomeDirUnavailable,

    /// Reading the confirmation answer failed
    #[error("Failed to read confirmation answer: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Result type for setup operations
pub type SetupResult<T> = Result<T, SetupError>;

/// Attach a path to a raw I/O result
pub trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> SetupResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> SetupResult<T> {
        self.map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
