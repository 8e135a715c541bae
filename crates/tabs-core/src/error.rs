use std::path::PathBuf;
use thiserror::Error;

/// Storage errors produced by the configuration store and the ledger.
#[derive(Error, Debug)]
pub enum TabsError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file (or its temp sibling) could not be written or renamed into place.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout the review-tabs crates.
pub type Result<T> = std::result::Result<T, TabsError>;
