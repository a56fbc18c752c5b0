//! Error types for countlineslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting lines
#[derive(Error, Debug)]
pub enum CountError {
    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Target path does not exist
    #[error("path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// Target path exists but is not a directory
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Failed to serialize a report
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
