//! Shared types passed between pipeline stages.
//!
//! Records flow provider → download → optimize and end up serialized inside
//! the metadata files, so their JSON shape is part of the output contract.

use crate::config::WebSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which provider produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Unsplash,
    Placeholder,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Unsplash => write!(f, "unsplash"),
            ImageSource::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// A candidate image, as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Page or display URL for attribution.
    #[serde(rename = "url")]
    pub source_url: String,
    /// URL the bytes are fetched from.
    pub download_url: String,
    pub author: String,
    pub description: String,
    pub source: ImageSource,
}

/// A successfully optimized image and its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedImage {
    /// Output file name, e.g. `music_1.webp`.
    pub filename: String,
    /// Output path as written (output directory joined with `filename`).
    pub path: String,
    #[serde(rename = "original_info")]
    pub record: ImageRecord,
    #[serde(rename = "optimized_specs")]
    pub web_spec: WebSpec,
}
