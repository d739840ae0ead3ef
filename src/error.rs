// src/error.rs
// =============================================================================
// Error types used across the tool.
//
// Three levels of failure, three enums:
// - ScanError: fatal, we could not even discover the documents
// - DocumentError: one document could not be read, prepared or written
// - FetchError: one image could not be downloaded
//
// Only ScanError ever reaches main(). The other two are logged and folded
// into the per-document report so one bad post never stops the run.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Traversal of the posts directory failed.
#[derive(Debug, Error)]
#[error("can't scan {path}: {source}")]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

/// A single image could not be localized.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The link target is not an absolute http(s) URL (e.g. already local)
    #[error("not a remote URL: {url}")]
    InvalidUrl { url: String },

    /// Network or transport failure, including reading the response body
    #[error("can't download {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The destination file could not be created
    #[error("can't create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the body to the destination file failed
    #[error("can't write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    // Only transport failures are worth another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Request { source, .. } => {
                source.is_timeout() || source.is_connect() || source.is_body()
            }
            _ => false,
        }
    }
}

/// Processing of one document stopped early.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("can't read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't create image directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
