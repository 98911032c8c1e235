//! Unsplash search provider.
//!
//! One `GET /search/photos` per category keyword (first `max_keywords`
//! only), landscape orientation, `per_page = count`. Every request is
//! followed by a fixed pause whatever its outcome, to stay under the API's
//! hourly limit. Without an access key the provider reports a skip and
//! sends nothing.

use super::{Fetched, ImageProvider, ProviderError};
use crate::config::{Category, UnsplashConfig};
use crate::types::{ImageRecord, ImageSource};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

const NAME: &str = "unsplash";

pub struct UnsplashProvider {
    access_key: Option<String>,
    api_url: String,
    max_keywords: usize,
    delay: Duration,
    timeout: Duration,
}

impl UnsplashProvider {
    pub fn new(config: &UnsplashConfig) -> Self {
        Self {
            access_key: config.access_key.clone(),
            api_url: config.api_url.clone(),
            max_keywords: config.max_keywords,
            delay: config.request_delay(),
            timeout: config.timeout(),
        }
    }

    fn search(
        &self,
        client: &Client,
        access_key: &str,
        keyword: &str,
        count: usize,
    ) -> Result<Vec<ImageRecord>, ProviderError> {
        let per_page = count.to_string();
        let response = client
            .get(&self.api_url)
            .query(&[
                ("query", keyword),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
                ("client_id", access_key),
            ])
            .send()
            .map_err(|source| ProviderError::Request {
                keyword: keyword.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                keyword: keyword.to_string(),
                status,
            });
        }

        let body: SearchResponse = response.json().map_err(|source| ProviderError::Decode {
            keyword: keyword.to_string(),
            source,
        })?;

        Ok(body.results.into_iter().map(Photo::into_record).collect())
    }
}

impl ImageProvider for UnsplashProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fetch(&self, category: &Category, count: usize) -> Fetched {
        let mut fetched = Fetched::default();

        let Some(access_key) = self.access_key.as_deref() else {
            fetched
                .issues
                .push(ProviderError::MissingCredential { provider: NAME });
            return fetched;
        };

        let client = match Client::builder().timeout(self.timeout).build() {
            Ok(client) => client,
            Err(e) => {
                fetched.issues.push(ProviderError::Client(e));
                return fetched;
            }
        };

        for keyword in category.keywords.iter().take(self.max_keywords) {
            match self.search(&client, access_key, keyword, count) {
                Ok(records) => fetched.records.extend(records),
                Err(e) => fetched.issues.push(e),
            }
            std::thread::sleep(self.delay);
        }

        fetched.records.truncate(count);
        fetched
    }
}

// Only the fields the curator reads; everything else in the payload is ignored.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
    links: PhotoLinks,
    user: PhotoUser,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    download: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
}

impl Photo {
    fn into_record(self) -> ImageRecord {
        ImageRecord {
            source_url: self.urls.regular,
            download_url: self.links.download,
            author: self.user.name,
            description: self.description.unwrap_or_default(),
            source: ImageSource::Unsplash,
        }
    }
}
