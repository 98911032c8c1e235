//! Candidate image sources.
//!
//! A provider turns a [`Category`] into a bounded list of [`ImageRecord`]s.
//! Providers never fail as a whole: per-request problems are returned as
//! [`ProviderError`] issues next to whatever records were collected, and the
//! curator reports them and moves on.
//!
//! ## Selection
//!
//! Providers form an ordered chain, best source first. [`resolve_candidates`]
//! asks each one in turn for the records still missing and stops consulting
//! the chain once `count` records are in hand:
//!
//! ```text
//! unsplash (key-gated)  →  placeholder (always available)
//!   0..2·count records       fills the remainder
//! ```
//!
//! The combined list is truncated to exactly `count`.

mod placeholder;
mod unsplash;

pub use placeholder::PlaceholderProvider;
pub use unsplash::UnsplashProvider;

use crate::config::{Category, CuratorConfig};
use crate::types::ImageRecord;
use reqwest::StatusCode;
use thiserror::Error;

/// A recoverable provider problem. None of these abort a run.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no access key configured, skipping")]
    MissingCredential { provider: &'static str },
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("search for '{keyword}' failed: {source}")]
    Request {
        keyword: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("search for '{keyword}' returned {status}")]
    Status { keyword: String, status: StatusCode },
    #[error("search for '{keyword}' returned an unreadable body: {source}")]
    Decode {
        keyword: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ProviderError {
    /// True when the endpoint asked us to slow down (HTTP 429).
    ///
    /// Recovery is the same as for any other status; this only changes how
    /// the issue reads in the log.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::Status { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS)
    }
}

/// Records collected from one provider call, plus anything that went wrong.
#[derive(Debug, Default)]
pub struct Fetched {
    pub records: Vec<ImageRecord>,
    pub issues: Vec<ProviderError>,
}

/// A source of candidate images.
pub trait ImageProvider {
    /// Short name used in progress output.
    fn name(&self) -> &'static str;

    /// Produce at most `count` records for `category`.
    fn fetch(&self, category: &Category, count: usize) -> Fetched;
}

/// A provider issue tagged with the provider that raised it.
#[derive(Debug)]
pub struct ProviderIssue {
    pub provider: &'static str,
    pub error: ProviderError,
}

/// Result of running the provider chain for one category.
#[derive(Debug, Default)]
pub struct Candidates {
    pub records: Vec<ImageRecord>,
    pub issues: Vec<ProviderIssue>,
}

/// Run the provider chain for a category, collecting exactly up to `count`
/// records.
pub fn resolve_candidates(
    providers: &[Box<dyn ImageProvider>],
    category: &Category,
    count: usize,
) -> Candidates {
    let mut candidates = Candidates::default();

    for provider in providers {
        let missing = count.saturating_sub(candidates.records.len());
        if missing == 0 {
            break;
        }
        let fetched = provider.fetch(category, missing);
        candidates.records.extend(fetched.records);
        candidates
            .issues
            .extend(fetched.issues.into_iter().map(|error| ProviderIssue {
                provider: provider.name(),
                error,
            }));
    }

    candidates.records.truncate(count);
    candidates
}

/// Build the standard chain: Unsplash first, placeholders as fallback.
pub fn default_chain(config: &CuratorConfig) -> Vec<Box<dyn ImageProvider>> {
    vec![
        Box::new(UnsplashProvider::new(&config.unsplash)),
        Box::new(PlaceholderProvider::new(&config.placeholder)),
    ]
}
