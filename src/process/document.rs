// src/process/document.rs
// =============================================================================
// Per-document processing.
//
// Lifecycle of a document:
//   loaded -> extracted -> (no images | localized) -> written
//                                      \-> failed (read / mkdir / write)
//
// Rules:
// - Nothing found: the file is not touched at all
// - Images are handled one after another, in the order they were extracted
// - Each successful download rewrites the in-memory text immediately
// - A failed download only costs that one image; its link stays remote
// - The document is written once at the end, via temp file + rename
//
// No error ever leaves process_document(). It always returns a report.
// =============================================================================

use crate::error::DocumentError;
use crate::fetch::ImageFetcher;
use crate::links::{extract_image_urls, file_name_of, localize_links};
use serde::Serialize;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// How processing of a document ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    /// No qualifying image link, file left untouched
    NoImages,
    /// File rewritten; `failed` images kept their remote links
    Localized { localized: usize, failed: usize },
    /// Processing stopped early
    Failed { reason: String },
}

/// The outcome for one document, as shown in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

impl DocumentReport {
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, DocumentStatus::Failed { .. })
    }
}

// Localizes every image of the document at `path`
//
// Never fails: errors are logged and recorded in the returned report
pub async fn process_document(fetcher: &ImageFetcher, path: &Path) -> DocumentReport {
    let status = match localize(fetcher, path).await {
        Ok(status) => status,
        Err(err) => {
            warn!(error = %err, "document not processed");
            DocumentStatus::Failed {
                reason: err.to_string(),
            }
        }
    };

    DocumentReport {
        path: path.to_path_buf(),
        status,
    }
}

async fn localize(fetcher: &ImageFetcher, path: &Path) -> Result<DocumentStatus, DocumentError> {
    let name = display_name(path);

    let mut text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let urls = extract_image_urls(&text);
    if urls.is_empty() {
        info!(document = %name, "no image found");
        return Ok(DocumentStatus::NoImages);
    }

    let image_dir = image_dir_for(path);
    create_image_dir(&image_dir).await?;

    let mut localized = 0;
    let mut failed = 0;

    for url in &urls {
        let url = url.as_str();
        let local = file_name_of(url);

        match fetcher.fetch(url, &image_dir.join(local)).await {
            Ok(()) => {
                text = localize_links(&text, url, local);
                localized += 1;
                debug!(document = %name, url, local, "image saved");
            }
            Err(err) => {
                failed += 1;
                warn!(document = %name, url, error = %err, "image not localized");
            }
        }
    }

    write_atomically(path, text).await?;

    info!(document = %name, localized, failed, "done");
    Ok(DocumentStatus::Localized { localized, failed })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// posts/hello.md -> posts/hello/
fn image_dir_for(path: &Path) -> PathBuf {
    path.with_extension("")
}

async fn create_image_dir(dir: &Path) -> Result<(), DocumentError> {
    let create_err = |source| DocumentError::CreateDir {
        path: dir.to_path_buf(),
        source,
    };

    // an existing directory is reused, anything else in the way is an error
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(create_err(io::Error::new(
                ErrorKind::AlreadyExists,
                "exists and is not a directory",
            )))
        }
        Err(_) => {}
    }

    match tokio::fs::create_dir(dir).await {
        Ok(()) => Ok(()),
        // created in the meantime
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(create_err(source)),
    }
}

// Replaces `path` with `text` without ever leaving it half written
//
// The new content goes to a uniquely named temp file in the same directory,
// which is then renamed over the document.
async fn write_atomically(path: &Path, text: String) -> Result<(), DocumentError> {
    let target = path.to_path_buf();
    let written = tokio::task::spawn_blocking(move || replace_file(&target, &text))
        .await
        .unwrap_or_else(|join| Err(io::Error::new(ErrorKind::Other, join)));

    written.map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn replace_file(path: &Path, text: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;

    // temp files are created owner-only; keep the document's own mode
    match std::fs::metadata(path) {
        Ok(meta) => {
            if let Err(err) = tmp.as_file().set_permissions(meta.permissions()) {
                debug!(path = %path.display(), error = %err, "can't copy permissions");
            }
        }
        Err(err) => debug!(path = %path.display(), error = %err, "can't read permissions"),
    }

    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
