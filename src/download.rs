//! Download stage: fetch a record's bytes into a temporary file.
//!
//! The returned [`TempPath`] owns the file. Dropping it deletes the file and
//! swallows any deletion error, so the raw download disappears on every exit
//! path of the caller: optimized, failed, or unwound.

use crate::config::DownloadConfig;
use crate::types::ImageRecord;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::path::Path;
use tempfile::TempPath;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DownloadError::Request(e) if e.is_timeout())
    }
}

/// Blocking HTTP downloader with a per-request time bound.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(config: &DownloadConfig) -> Result<Self, DownloadError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client })
    }

    /// Fetch `record.download_url` and write the body to `dest`.
    ///
    /// Nothing is written unless the whole body arrived with a success status.
    pub fn download(&self, record: &ImageRecord, dest: &Path) -> Result<TempPath, DownloadError> {
        let response = self.client.get(&record.download_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }
        let bytes = response.bytes()?;
        std::fs::write(dest, &bytes)?;
        Ok(TempPath::try_from_path(dest)?)
    }
}
