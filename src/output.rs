//! CLI output formatting for the curation run.
//!
//! # Output Format
//!
//! ## Curate
//!
//! ```text
//! Output: ./assets/categories
//! Web spec: 400x300 WebP, quality 85, aspect 4:3
//! Curating 2 categories
//!
//! music: Music and audio content
//!     unsplash: no access key configured, skipping
//!     2 of 2 candidates
//!     001 downloading (1 of 2)
//!         optimized: music_1.webp
//!     002 downloading (2 of 2)
//!         download timed out: request failed: ...
//!     Completed music: 1 image → music_metadata.json
//!
//! Summary
//!     Categories: 2
//!     Images: 4
//!     music: 1
//!     software: 3
//!     Report: curation_report.json
//! ```
//!
//! ## Categories
//!
//! ```text
//! 001 digital_art: Creative digital artwork and illustrations
//!     Keywords: digital art, illustration, graphic design, creative art
//!     Color: #6c5ce7
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::config::{CuratorConfig, WebSpec};
use crate::curate::CurateEvent;
use crate::metadata::CurationReport;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

/// One-line description of the target format.
///
/// ```text
/// 400x300 WebP, quality 85, aspect 4:3
/// ```
fn web_spec_line(spec: &WebSpec) -> String {
    format!(
        "{}x{} {:?}, quality {}, aspect {}",
        spec.width, spec.height, spec.format, spec.quality, spec.aspect_ratio
    )
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Curate progress
// ============================================================================

/// Format a single curation progress event as display lines.
pub fn format_curate_event(event: &CurateEvent) -> Vec<String> {
    match event {
        CurateEvent::RunStarted {
            output_dir,
            web_spec,
            category_count,
        } => vec![
            format!("Output: {}", output_dir.display()),
            format!("Web spec: {}", web_spec_line(web_spec)),
            format!(
                "Curating {}",
                plural(*category_count, "category", "categories")
            ),
        ],
        CurateEvent::CategoryStarted { key, description } => {
            vec![String::new(), format!("{}: {}", key, description)]
        }
        CurateEvent::ProviderIssue {
            provider,
            message,
            rate_limited,
        } => {
            let suffix = if *rate_limited { " (rate limited)" } else { "" };
            vec![format!("{}{}: {}{}", indent(1), provider, message, suffix)]
        }
        CurateEvent::CandidatesResolved {
            found, requested, ..
        } => vec![format!("{}{} of {} candidates", indent(1), found, requested)],
        CurateEvent::Downloading { index, total } => vec![format!(
            "{}{} downloading ({} of {})",
            indent(1),
            format_index(*index),
            index,
            total
        )],
        CurateEvent::DownloadFailed {
            message, timed_out, ..
        } => {
            let label = if *timed_out {
                "download timed out"
            } else {
                "download failed"
            };
            vec![format!("{}{}: {}", indent(2), label, message)]
        }
        CurateEvent::Optimized { filename, .. } => {
            vec![format!("{}optimized: {}", indent(2), filename)]
        }
        CurateEvent::OptimizeFailed { message, .. } => {
            vec![format!("{}optimize failed: {}", indent(2), message)]
        }
        CurateEvent::CategoryCompleted {
            key,
            image_count,
            metadata_file,
        } => vec![format!(
            "{}Completed {}: {} → {}",
            indent(1),
            key,
            plural(*image_count, "image", "images"),
            metadata_file
        )],
        CurateEvent::CategoryFailed { key, message } => {
            vec![format!("{}Failed {}: {}", indent(1), key, message)]
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Format the end-of-run summary.
pub fn format_report(report: &CurationReport, report_path: &Path) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "Summary".to_string(),
        format!("{}Categories: {}", indent(1), report.summary.total_categories),
        format!("{}Images: {}", indent(1), report.summary.total_images),
    ];
    for key in &report.summary.categories {
        lines.push(format!("{}{}: {}", indent(1), key, report.image_count(key)));
    }
    lines.push(format!("{}Report: {}", indent(1), file_name_of(report_path)));
    lines
}

pub fn print_report(report: &CurationReport, report_path: &Path) {
    for line in format_report(report, report_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Category listing
// ============================================================================

/// Format the configured categories, in processing order.
pub fn format_categories(config: &CuratorConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, category) in config.categories.iter().enumerate() {
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            category.key,
            category.description
        ));
        if !category.keywords.is_empty() {
            lines.push(format!(
                "{}Keywords: {}",
                indent(1),
                category.keywords.join(", ")
            ));
        }
        if let Some(color) = &category.color {
            lines.push(format!("{}Color: #{}", indent(1), color));
        }
    }
    lines
}

pub fn print_categories(config: &CuratorConfig) {
    for line in format_categories(config) {
        println!("{}", line);
    }
}
