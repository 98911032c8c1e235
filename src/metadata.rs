//! Metadata documents written next to the optimized images.
//!
//! Two independent JSON files, both overwritten on every run:
//!
//! ## Per-category (`<category>_metadata.json`)
//!
//! ```json
//! {
//!   "category": "music",
//!   "description": "Music and audio content",
//!   "web_specs": { "width": 400, "height": 300, "format": "WebP", ... },
//!   "images": [ { "filename": "music_1.webp", "path": "...", "original_info": {...}, "optimized_specs": {...} } ],
//!   "generated_at": "2026-10-17 14:03:11"
//! }
//! ```
//!
//! ## Summary (`curation_report.json`)
//!
//! ```json
//! {
//!   "summary": { "total_categories": 5, "total_images": 15, "web_specs": {...}, "categories": ["digital_art", ...] },
//!   "results": { "digital_art": [ ... ], ... },
//!   "generated_at": "2026-10-17 14:03:42"
//! }
//! ```
//!
//! Counts are derived from the image lists when the report is built, so the
//! totals always agree with the per-category entries.

use crate::config::{Category, WebSpec};
use crate::naming::{REPORT_FILENAME, metadata_filename};
use crate::types::OptimizedImage;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Local wall-clock time in the format used by every metadata file.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Contents of `<category>_metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetadata {
    pub category: String,
    pub description: String,
    #[serde(rename = "web_specs")]
    pub web_spec: WebSpec,
    pub images: Vec<OptimizedImage>,
    pub generated_at: String,
}

impl CategoryMetadata {
    pub fn new(category: &Category, web_spec: &WebSpec, images: Vec<OptimizedImage>) -> Self {
        Self {
            category: category.key.clone(),
            description: category.description.clone(),
            web_spec: web_spec.clone(),
            images,
            generated_at: timestamp(),
        }
    }
}

/// Totals block of the summary report.
///
/// `total_categories` counts the categories processed in this run, which is
/// fewer than configured when the run was limited with `--category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_categories: usize,
    pub total_images: usize,
    #[serde(rename = "web_specs")]
    pub web_spec: WebSpec,
    /// Category keys in processing order.
    pub categories: Vec<String>,
}

/// Contents of `curation_report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationReport {
    pub summary: ReportSummary,
    /// Images per category, keyed in processing order.
    pub results: IndexMap<String, Vec<OptimizedImage>>,
    pub generated_at: String,
}

impl CurationReport {
    /// Build a report from per-category results, in processing order.
    pub fn new(web_spec: &WebSpec, results: Vec<(String, Vec<OptimizedImage>)>) -> Self {
        let categories: Vec<String> = results.iter().map(|(key, _)| key.clone()).collect();
        let total_images = results.iter().map(|(_, images)| images.len()).sum();
        Self {
            summary: ReportSummary {
                total_categories: categories.len(),
                total_images,
                web_spec: web_spec.clone(),
                categories,
            },
            results: results.into_iter().collect(),
            generated_at: timestamp(),
        }
    }

    /// Number of images recorded for a category (0 if absent).
    pub fn image_count(&self, category: &str) -> usize {
        self.results.get(category).map_or(0, Vec::len)
    }
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<PathBuf, MetadataError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, json).map_err(|source| MetadataError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Write `<category>_metadata.json` into `output_dir`, returning its path.
pub fn write_category_metadata(
    output_dir: &Path,
    metadata: &CategoryMetadata,
) -> Result<PathBuf, MetadataError> {
    write_json(output_dir.join(metadata_filename(&metadata.category)), metadata)
}

/// Write `curation_report.json` into `output_dir`, returning its path.
pub fn write_report(output_dir: &Path, report: &CurationReport) -> Result<PathBuf, MetadataError> {
    write_json(output_dir.join(REPORT_FILENAME), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CuratorConfig;
    use crate::types::{ImageRecord, ImageSource};
    use tempfile::TempDir;

    fn image(category: &str, n: usize) -> OptimizedImage {
        OptimizedImage {
            filename: format!("{category}_{n}.webp"),
            path: format!("out/{category}_{n}.webp"),
            record: ImageRecord {
                source_url: format!("https://picsum.photos/800/600?random={n}"),
                download_url: format!("https://picsum.photos/800/600?random={n}"),
                author: "Placeholder Service".to_string(),
                description: format!("{category} placeholder image {n}"),
                source: ImageSource::Placeholder,
            },
            web_spec: WebSpec::default(),
        }
    }

    #[test]
    fn timestamp_format() {
        let ts = timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn category_metadata_json_shape() {
        let config = CuratorConfig::default();
        let metadata = CategoryMetadata::new(
            config.category("music").unwrap(),
            &config.web_spec,
            vec![image("music", 1), image("music", 2)],
        );
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["category"], "music");
        assert_eq!(json["description"], "Music and audio content");
        assert_eq!(json["web_specs"]["width"], 400);
        assert_eq!(json["images"].as_array().unwrap().len(), 2);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn write_category_metadata_roundtrip_and_overwrite() {
        let tmp = TempDir::new().unwrap();
        let config = CuratorConfig::default();
        let music = config.category("music").unwrap();

        let first = CategoryMetadata::new(music, &config.web_spec, vec![image("music", 1)]);
        write_category_metadata(tmp.path(), &first).unwrap();
        let second = CategoryMetadata::new(music, &config.web_spec, vec![]);
        let path = write_category_metadata(tmp.path(), &second).unwrap();

        assert_eq!(path, tmp.path().join("music_metadata.json"));
        let read: CategoryMetadata =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, second);
    }

    #[test]
    fn report_totals_match_results() {
        let report = CurationReport::new(
            &WebSpec::default(),
            vec![
                ("software".to_string(), vec![image("software", 1)]),
                ("music".to_string(), vec![image("music", 1), image("music", 3)]),
                ("ebooks".to_string(), vec![]),
            ],
        );

        assert_eq!(report.summary.total_categories, 3);
        assert_eq!(report.summary.total_images, 3);
        assert_eq!(report.summary.categories, vec!["software", "music", "ebooks"]);
        assert_eq!(report.image_count("music"), 2);
        assert_eq!(report.image_count("ebooks"), 0);
        assert_eq!(report.image_count("unknown"), 0);
    }

    #[test]
    fn write_report_json_shape() {
        let tmp = TempDir::new().unwrap();
        let report = CurationReport::new(
            &WebSpec::default(),
            vec![("music".to_string(), vec![image("music", 1)])],
        );

        let path = write_report(tmp.path(), &report).unwrap();

        assert_eq!(path, tmp.path().join("curation_report.json"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["summary"]["total_images"], 1);
        assert_eq!(json["summary"]["web_specs"]["format"], "WebP");
        assert_eq!(json["results"]["music"][0]["filename"], "music_1.webp");
    }

    #[test]
    fn report_results_keep_processing_order_in_json() {
        let tmp = TempDir::new().unwrap();
        let keys = ["digital_art", "software", "ebooks", "templates", "music"];
        let report = CurationReport::new(
            &WebSpec::default(),
            keys.iter().map(|k| (k.to_string(), vec![image(k, 1)])).collect(),
        );

        let path = write_report(tmp.path(), &report).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let results = &text[text.find("\"results\"").unwrap()..];
        let offsets: Vec<usize> = keys
            .iter()
            .map(|k| results.find(&format!("\"{k}\": [")).unwrap())
            .collect();

        assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{offsets:?}");
        let read: CurationReport = serde_json::from_str(&text).unwrap();
        assert_eq!(read.results.keys().collect::<Vec<_>>(), keys);
    }

    #[test]
    fn total_categories_counts_processed_subset() {
        let report = CurationReport::new(
            &WebSpec::default(),
            vec![("music".to_string(), vec![image("music", 1)])],
        );

        assert_eq!(report.summary.total_categories, 1);
        assert_eq!(report.summary.categories, vec!["music"]);
    }

    #[test]
    fn write_into_missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let report = CurationReport::new(&WebSpec::default(), vec![]);

        let result = write_report(&tmp.path().join("nope"), &report);
        assert!(matches!(result, Err(MetadataError::Io { .. })));
    }
}
