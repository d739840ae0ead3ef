// src/fetch/image.rs
// =============================================================================
// This module downloads a single image to a local file.
//
// Key functionality:
// - Rejects targets that are not absolute http(s) URLs before any I/O
// - Plain GET, no custom headers, transport defaults for redirects/timeouts
// - Streams the body chunk by chunk into the destination file
// - Removes the partial file if the stream or the write fails
// - Retries transport failures according to a RetryPolicy
//
// Note: the status code is not checked. Whatever the server answers is what
// ends up on disk, error pages included.
// =============================================================================

use super::policy::RetryPolicy;
use crate::error::FetchError;
use reqwest::{Client, Response};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

// Downloads images over one shared HTTP client
//
// Client is reference counted internally, so cloning an ImageFetcher for each
// worker shares the same connection pool.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl ImageFetcher {
    pub fn new(policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, policy })
    }

    // Downloads `url` into `dest`, creating or truncating it
    //
    // Returns: Ok(()) once the whole body is on disk
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let parsed = parse_remote(url)?;
        let mut attempt = 1;

        loop {
            match self.fetch_once(parsed.clone(), url, dest).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() => match self.policy.backoff(attempt) {
                    Some(delay) => {
                        debug!(url, attempt, ?delay, error = %err, "retrying download");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => return Err(err),
                },
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_once(&self, parsed: Url, url: &str, dest: &Path) -> Result<(), FetchError> {
        let mut response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "saving body of non-success response");
        }

        let mut file = File::create(dest)
            .await
            .map_err(|source| FetchError::CreateFile {
                path: dest.to_path_buf(),
                source,
            })?;

        let copied = copy_body(&mut response, &mut file, url, dest).await;
        if copied.is_err() {
            drop(file);
            // best effort, the original error is what gets reported
            let _ = tokio::fs::remove_file(dest).await;
        }

        copied
    }
}

// Only absolute http(s) URLs can be downloaded
fn parse_remote(url: &str) -> Result<Url, FetchError> {
    Url::parse(url)
        .ok()
        .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .ok_or_else(|| FetchError::InvalidUrl {
            url: url.to_string(),
        })
}

async fn copy_body(
    response: &mut Response,
    file: &mut File,
    url: &str,
    dest: &Path,
) -> Result<(), FetchError> {
    let write_err = |source| FetchError::Write {
        path: dest.to_path_buf(),
        source,
    };

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?
    {
        file.write_all(&chunk).await.map_err(write_err)?;
    }

    file.flush().await.map_err(write_err)?;
    Ok(())
}
