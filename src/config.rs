//! Curator configuration module.
//!
//! Handles loading, validating, and merging `curator.toml`. Stock defaults
//! cover everything, so a missing file is a valid configuration: the five
//! marketplace categories, the 400x300 WebP web spec, and the public
//! placeholder hosts.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! images_per_category = 3
//!
//! [web_spec]
//! width = 400
//! height = 300
//! format = "WebP"
//! quality = 85
//! aspect_ratio = "4:3"
//!
//! [unsplash]
//! # access_key = "..."       # Unset = provider disabled
//! api_url = "https://api.unsplash.com/search/photos"
//! max_keywords = 2
//! request_delay_ms = 1000
//! timeout_secs = 10
//!
//! [placeholder]
//! photo_url = "https://picsum.photos"
//! color_url = "https://via.placeholder.com"
//! default_color = "74b9ff"
//!
//! [download]
//! timeout_secs = 30
//!
//! [[categories]]
//! key = "music"
//! description = "Music and audio content"
//! keywords = ["music", "audio", "sound", "headphones"]
//! color = "fd79a8"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables merge key-by-key over the stock defaults, so overriding a single
//! value is enough:
//!
//! ```toml
//! [unsplash]
//! access_key = "abc123"
//! ```
//!
//! Arrays replace wholesale: a `[[categories]]` list in the user file
//! replaces the stock category table entirely.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::parse_aspect_ratio;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default file name looked up by the CLI.
pub const CONFIG_FILENAME: &str = "curator.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Curator configuration loaded from `curator.toml`.
///
/// Built once at startup and passed by reference to every stage; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CuratorConfig {
    /// Target number of optimized images per category.
    pub images_per_category: usize,
    /// Output dimensions, format, and quality applied to every image.
    pub web_spec: WebSpec,
    /// Search API provider settings.
    pub unsplash: UnsplashConfig,
    /// Placeholder provider hosts.
    pub placeholder: PlaceholderConfig,
    /// Download stage settings.
    pub download: DownloadConfig,
    /// Category table, processed in this order.
    pub categories: Vec<Category>,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            images_per_category: 3,
            web_spec: WebSpec::default(),
            unsplash: UnsplashConfig::default(),
            placeholder: PlaceholderConfig::default(),
            download: DownloadConfig::default(),
            categories: default_categories(),
        }
    }
}

impl CuratorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images_per_category == 0 {
            return Err(ConfigError::Validation(
                "images_per_category must be at least 1".into(),
            ));
        }
        self.web_spec.validate()?;
        if self.unsplash.max_keywords == 0 {
            return Err(ConfigError::Validation(
                "unsplash.max_keywords must be at least 1".into(),
            ));
        }
        if self.unsplash.timeout_secs == 0 || self.download.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "unsplash.timeout_secs and download.timeout_secs must be at least 1".into(),
            ));
        }
        if !is_hex_color(&self.placeholder.default_color) {
            return Err(ConfigError::Validation(format!(
                "placeholder.default_color must be a 6-digit hex color, got '{}'",
                self.placeholder.default_color
            )));
        }
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "at least one category must be configured".into(),
            ));
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            category.validate()?;
            if !seen.insert(category.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category key '{}'",
                    category.key
                )));
            }
        }
        Ok(())
    }

    /// Look up a category by key.
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Keys of all configured categories, in processing order.
    pub fn category_keys(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.key.clone()).collect()
    }
}

/// A marketplace category images are curated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Stable identifier, also the output filename prefix (e.g. `digital_art`).
    pub key: String,
    /// Human-readable description written into the category metadata.
    pub description: String,
    /// Search keywords, most relevant first.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Background color for solid-color placeholders (hex, no `#`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(key: &str, description: &str, keywords: &[&str], color: &str) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            color: Some(color.to_string()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let key_ok = !self.key.is_empty()
            && self
                .key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !key_ok {
            return Err(ConfigError::Validation(format!(
                "category key '{}' must be non-empty and use only a-z, 0-9 and '_'",
                self.key
            )));
        }
        match &self.color {
            Some(color) if !is_hex_color(color) => Err(ConfigError::Validation(format!(
                "category '{}' color must be a 6-digit hex color, got '{}'",
                self.key, color
            ))),
            _ => Ok(()),
        }
    }
}

fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "digital_art",
            "Creative digital artwork and illustrations",
            &["digital art", "illustration", "graphic design", "creative art"],
            "6c5ce7",
        ),
        Category::new(
            "software",
            "Software development and programming tools",
            &["software", "code", "programming", "development"],
            "2d3436",
        ),
        Category::new(
            "ebooks",
            "Educational content and e-books",
            &["books", "reading", "education", "learning"],
            "00b894",
        ),
        Category::new(
            "templates",
            "Design templates and layouts",
            &["templates", "design", "layout", "business"],
            "e17055",
        ),
        Category::new(
            "music",
            "Music and audio content",
            &["music", "audio", "sound", "headphones"],
            "fd79a8",
        ),
    ]
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Encoded output format. WebP is the only target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebFormat {
    #[default]
    WebP,
}

impl WebFormat {
    /// File extension for outputs in this format.
    pub fn extension(self) -> &'static str {
        match self {
            WebFormat::WebP => "webp",
        }
    }
}

/// Target web spec, applied uniformly to every optimized image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebSpec {
    /// Maximum output width in pixels.
    pub width: u32,
    /// Maximum output height in pixels.
    pub height: u32,
    pub format: WebFormat,
    /// Lossy encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Nominal aspect ratio as `W:H`, informational for consumers.
    pub aspect_ratio: String,
}

impl Default for WebSpec {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            format: WebFormat::WebP,
            quality: 85,
            aspect_ratio: "4:3".to_string(),
        }
    }
}

impl WebSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(
                "web_spec.width and web_spec.height must be non-zero".into(),
            ));
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(ConfigError::Validation(
                "web_spec.quality must be 1-100".into(),
            ));
        }
        if parse_aspect_ratio(&self.aspect_ratio).is_none() {
            return Err(ConfigError::Validation(format!(
                "web_spec.aspect_ratio must look like '4:3', got '{}'",
                self.aspect_ratio
            )));
        }
        Ok(())
    }
}

/// Search API provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnsplashConfig {
    /// API access key. When absent the provider is skipped entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    /// Search endpoint.
    pub api_url: String,
    /// Number of category keywords searched, in order.
    pub max_keywords: usize,
    /// Pause after every search request.
    pub request_delay_ms: u64,
    /// Bound on a single search request.
    pub timeout_secs: u64,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            api_url: "https://api.unsplash.com/search/photos".to_string(),
            max_keywords: 2,
            request_delay_ms: 1000,
            timeout_secs: 10,
        }
    }
}

impl UnsplashConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Placeholder provider hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderConfig {
    /// Random photograph host (`<url>/800/600?random=N`).
    pub photo_url: String,
    /// Solid-color rectangle host (`<url>/800x600/<bg>/<fg>?text=...`).
    pub color_url: String,
    /// Background for categories without their own color.
    pub default_color: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            photo_url: "https://picsum.photos".to_string(),
            color_url: "https://via.placeholder.com".to_string(),
            default_color: "74b9ff".to_string(),
        }
    }
}

/// Download stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadConfig {
    /// Bound on a single image download.
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl DownloadConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CuratorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CuratorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CuratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when it
/// does not exist.
pub fn load_config(path: &Path) -> Result<CuratorConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `curator.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Curator Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge over the defaults key by key. Arrays (including the
# [[categories]] list) replace the defaults entirely.
# Unknown keys will cause an error.

# Number of optimized images to produce for each category.
images_per_category = 3

# ---------------------------------------------------------------------------
# Web spec: applied to every output image
# ---------------------------------------------------------------------------
[web_spec]
# Bounding box. Images are shrunk to fit, never enlarged or cropped.
width = 400
height = 300

# Output format. WebP is the only supported target.
format = "WebP"

# Lossy encoding quality (1 = worst, 100 = best).
quality = 85

# Nominal aspect ratio recorded in metadata for consumers.
aspect_ratio = "4:3"

# ---------------------------------------------------------------------------
# Unsplash search (primary provider)
# ---------------------------------------------------------------------------
[unsplash]
# API access key. Without it the provider is skipped and every image
# comes from the placeholder hosts.
# access_key = "YOUR_UNSPLASH_ACCESS_KEY"

api_url = "https://api.unsplash.com/search/photos"

# Number of category keywords searched.
max_keywords = 2

# Pause after every search request, to stay under the API rate limit.
request_delay_ms = 1000

# Seconds before a search request is abandoned.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Placeholder hosts (fallback provider)
# ---------------------------------------------------------------------------
[placeholder]
photo_url = "https://picsum.photos"
color_url = "https://via.placeholder.com"

# Background for categories without their own color.
default_color = "74b9ff"

# ---------------------------------------------------------------------------
# Downloads
# ---------------------------------------------------------------------------
[download]
# Seconds before an image download is abandoned.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Categories, processed in this order
# ---------------------------------------------------------------------------
[[categories]]
key = "digital_art"
description = "Creative digital artwork and illustrations"
keywords = ["digital art", "illustration", "graphic design", "creative art"]
color = "6c5ce7"

[[categories]]
key = "software"
description = "Software development and programming tools"
keywords = ["software", "code", "programming", "development"]
color = "2d3436"

[[categories]]
key = "ebooks"
description = "Educational content and e-books"
keywords = ["books", "reading", "education", "learning"]
color = "00b894"

[[categories]]
key = "templates"
description = "Design templates and layouts"
keywords = ["templates", "design", "layout", "business"]
color = "e17055"

[[categories]]
key = "music"
description = "Music and audio content"
keywords = ["music", "audio", "sound", "headphones"]
color = "fd79a8"
"##
}
