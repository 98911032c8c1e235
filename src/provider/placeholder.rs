//! Placeholder provider: synthesized URLs, no API, always available.
//!
//! Three random photographs from the photo host, then two solid-color
//! cards from the color host carrying the category name:
//!
//! ```text
//! <photo_url>/800/600?random=1
//! <photo_url>/800/600?random=2
//! <photo_url>/800/600?random=3
//! <color_url>/800x600/fd79a8/ffffff?text=Music+1
//! <color_url>/800x600/fd79a8/ffffff?text=Music+2
//! ```
//!
//! Nothing is checked over the network here; a dead URL surfaces later as a
//! failed download.

use super::{Fetched, ImageProvider};
use crate::config::{Category, PlaceholderConfig};
use crate::naming::overlay_text;
use crate::types::{ImageRecord, ImageSource};

const PHOTO_COUNT: usize = 3;
const COLOR_COUNT: usize = 2;

pub struct PlaceholderProvider {
    photo_url: String,
    color_url: String,
    default_color: String,
}

impl PlaceholderProvider {
    pub fn new(config: &PlaceholderConfig) -> Self {
        Self {
            photo_url: config.photo_url.trim_end_matches('/').to_string(),
            color_url: config.color_url.trim_end_matches('/').to_string(),
            default_color: config.default_color.clone(),
        }
    }

    /// All URLs this provider can offer for a category, in order.
    fn urls(&self, category: &Category) -> Vec<String> {
        let color = category.color.as_deref().unwrap_or(&self.default_color);
        let text = overlay_text(&category.key);

        let photos = (1..=PHOTO_COUNT).map(|i| format!("{}/800/600?random={}", self.photo_url, i));
        let cards = (1..=COLOR_COUNT)
            .map(|i| format!("{}/800x600/{}/ffffff?text={}+{}", self.color_url, color, text, i));
        photos.chain(cards).collect()
    }
}

impl ImageProvider for PlaceholderProvider {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn fetch(&self, category: &Category, count: usize) -> Fetched {
        let records = self
            .urls(category)
            .into_iter()
            .enumerate()
            .take(count)
            .map(|(i, url)| ImageRecord {
                source_url: url.clone(),
                download_url: url,
                author: "Placeholder Service".to_string(),
                description: format!("{} placeholder image {}", category.key, i + 1),
                source: ImageSource::Placeholder,
            })
            .collect();

        Fetched {
            records,
            issues: Vec::new(),
        }
    }
}
