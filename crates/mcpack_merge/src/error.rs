//! Error types for merge operations.
//!
//! All fallible functions in this crate return [`Result<T>`], which uses
//! [`Error`] as the error type. External error types (`std::io::Error`,
//! `serde_json::Error`, `zip` errors) are automatically converted via `From`
//! impls.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering or merging resource packs.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed (reading packs, writing the output tree, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON (descriptors, merge payloads).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The merge run was started with an empty pack list.
    #[error("no input packs to merge")]
    NoPacks,

    /// Catch-all for errors from traversal and other sources.
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
