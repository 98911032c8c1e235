//! The curation run: resolve, download, optimize, record.
//!
//! ## Flow
//!
//! ```text
//! for each selected category (configuration order):
//!     resolve_candidates ──► [record 1, record 2, ...]   (≤ count)
//!     for each record n:
//!         download  ──► <category>_temp_<n>.jpg         (dropped after optimize)
//!         optimize  ──► <category>_<n>.webp
//!     write <category>_metadata.json
//! write curation_report.json
//! ```
//!
//! ## Failure containment
//!
//! | Failure                     | Effect                                   |
//! |-----------------------------|------------------------------------------|
//! | provider request            | issue event, zero records from that call |
//! | download                    | image skipped                            |
//! | optimization                | image skipped, temp file still removed   |
//! | category metadata write     | category recorded with zero images       |
//! | output dir / client / report| run aborts with [`CurateError`]          |
//!
//! Nothing is retried and a skipped image is not replaced by a later
//! candidate, so a category can finish with fewer than `count` images. The
//! output index `n` is the candidate's position, so gaps are possible
//! (`music_1.webp`, `music_3.webp`).
//!
//! Progress is reported as [`CurateEvent`]s over an optional channel; the
//! `output` module renders them.

use crate::config::{Category, CuratorConfig, WebSpec};
use crate::download::{DownloadError, Downloader};
use crate::imaging::{ImageBackend, RustBackend, optimize_image};
use crate::metadata::{
    CategoryMetadata, CurationReport, MetadataError, write_category_metadata, write_report,
};
use crate::naming::{optimized_stem, temp_filename};
use crate::provider::{ImageProvider, default_chain, resolve_candidates};
use crate::types::OptimizedImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] DownloadError),
    #[error("Failed to write report: {0}")]
    Metadata(#[from] MetadataError),
    #[error("Unknown category '{key}' (known: {known})")]
    UnknownCategory { key: String, known: String },
}

/// What to curate and where to put it.
#[derive(Debug, Clone)]
pub struct CurateOptions {
    pub output_dir: PathBuf,
    /// Images per category; `None` uses `images_per_category` from config.
    pub count: Option<usize>,
    /// Category keys to process. Empty means all.
    pub only: Vec<String>,
}

impl CurateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            count: None,
            only: Vec::new(),
        }
    }
}

/// Progress events emitted during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum CurateEvent {
    RunStarted {
        output_dir: PathBuf,
        web_spec: WebSpec,
        category_count: usize,
    },
    CategoryStarted {
        key: String,
        description: String,
    },
    ProviderIssue {
        provider: &'static str,
        message: String,
        rate_limited: bool,
    },
    CandidatesResolved {
        key: String,
        found: usize,
        requested: usize,
    },
    Downloading {
        index: usize,
        total: usize,
    },
    DownloadFailed {
        index: usize,
        message: String,
        timed_out: bool,
    },
    Optimized {
        index: usize,
        filename: String,
    },
    OptimizeFailed {
        index: usize,
        message: String,
    },
    CategoryCompleted {
        key: String,
        image_count: usize,
        metadata_file: String,
    },
    CategoryFailed {
        key: String,
        message: String,
    },
}

fn emit(events: Option<&Sender<CurateEvent>>, event: CurateEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}

/// Pick the categories to process, in configuration order.
///
/// Every key in `only` must name a configured category.
pub fn select_categories<'a>(
    config: &'a CuratorConfig,
    only: &[String],
) -> Result<Vec<&'a Category>, CurateError> {
    if let Some(unknown) = only.iter().find(|key| config.category(key).is_none()) {
        return Err(CurateError::UnknownCategory {
            key: unknown.clone(),
            known: config.category_keys().join(", "),
        });
    }
    Ok(config
        .categories
        .iter()
        .filter(|c| only.is_empty() || only.contains(&c.key))
        .collect())
}

/// Run the curation with the production backend and provider chain.
pub fn curate(
    config: &CuratorConfig,
    options: &CurateOptions,
    events: Option<Sender<CurateEvent>>,
) -> Result<CurationReport, CurateError> {
    let backend = RustBackend::new();
    let providers = default_chain(config);
    let downloader = Downloader::new(&config.download)?;
    curate_with(&backend, &providers, &downloader, config, options, events)
}

/// Run the curation with explicit collaborators (allows testing with mocks).
pub fn curate_with(
    backend: &impl ImageBackend,
    providers: &[Box<dyn ImageProvider>],
    downloader: &Downloader,
    config: &CuratorConfig,
    options: &CurateOptions,
    events: Option<Sender<CurateEvent>>,
) -> Result<CurationReport, CurateError> {
    let categories = select_categories(config, &options.only)?;
    let count = options.count.unwrap_or(config.images_per_category);
    let events = events.as_ref();

    std::fs::create_dir_all(&options.output_dir)?;

    emit(
        events,
        CurateEvent::RunStarted {
            output_dir: options.output_dir.clone(),
            web_spec: config.web_spec.clone(),
            category_count: categories.len(),
        },
    );

    let mut results = Vec::with_capacity(categories.len());
    for category in categories {
        let images = match curate_category(
            backend,
            providers,
            downloader,
            &config.web_spec,
            category,
            count,
            &options.output_dir,
            events,
        ) {
            Ok(images) => images,
            Err(e) => {
                emit(
                    events,
                    CurateEvent::CategoryFailed {
                        key: category.key.clone(),
                        message: e.to_string(),
                    },
                );
                Vec::new()
            }
        };
        results.push((category.key.clone(), images));
    }

    let report = CurationReport::new(&config.web_spec, results);
    write_report(&options.output_dir, &report)?;
    Ok(report)
}

#[allow(clippy::too_many_arguments)]
fn curate_category(
    backend: &impl ImageBackend,
    providers: &[Box<dyn ImageProvider>],
    downloader: &Downloader,
    web_spec: &WebSpec,
    category: &Category,
    count: usize,
    output_dir: &Path,
    events: Option<&Sender<CurateEvent>>,
) -> Result<Vec<OptimizedImage>, MetadataError> {
    emit(
        events,
        CurateEvent::CategoryStarted {
            key: category.key.clone(),
            description: category.description.clone(),
        },
    );

    let candidates = resolve_candidates(providers, category, count);
    for issue in &candidates.issues {
        emit(
            events,
            CurateEvent::ProviderIssue {
                provider: issue.provider,
                message: issue.error.to_string(),
                rate_limited: issue.error.is_rate_limited(),
            },
        );
    }
    emit(
        events,
        CurateEvent::CandidatesResolved {
            key: category.key.clone(),
            found: candidates.records.len(),
            requested: count,
        },
    );

    let total = candidates.records.len();
    let mut images = Vec::new();

    for (i, record) in candidates.records.into_iter().enumerate() {
        let index = i + 1;
        emit(events, CurateEvent::Downloading { index, total });

        let temp_dest = output_dir.join(temp_filename(&category.key, index));
        let temp = match downloader.download(&record, &temp_dest) {
            Ok(temp) => temp,
            Err(e) => {
                emit(
                    events,
                    CurateEvent::DownloadFailed {
                        index,
                        message: e.to_string(),
                        timed_out: e.is_timeout(),
                    },
                );
                continue;
            }
        };

        let stem = optimized_stem(&category.key, index);
        let optimized = optimize_image(backend, &temp, output_dir, &stem, web_spec);
        drop(temp);

        match optimized {
            Ok(path) => {
                let filename = path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_else(|| stem.clone());
                emit(
                    events,
                    CurateEvent::Optimized {
                        index,
                        filename: filename.clone(),
                    },
                );
                images.push(OptimizedImage {
                    filename,
                    path: path.to_string_lossy().into_owned(),
                    record,
                    web_spec: web_spec.clone(),
                });
            }
            Err(e) => emit(
                events,
                CurateEvent::OptimizeFailed {
                    index,
                    message: e.to_string(),
                },
            ),
        }
    }

    let metadata = CategoryMetadata::new(category, web_spec, images);
    let metadata_path = write_category_metadata(output_dir, &metadata)?;

    emit(
        events,
        CurateEvent::CategoryCompleted {
            key: category.key.clone(),
            image_count: metadata.images.len(),
            metadata_file: metadata_path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
        },
    );
    Ok(metadata.images)
}
