//! Centralized file naming for everything the curator writes.
//!
//! All outputs live flat in one directory, prefixed by the category key so
//! several categories can share it:
//!
//! ```text
//! out/
//! ├── music_temp_1.jpg        # Raw download, removed after optimization
//! ├── music_1.webp            # Optimized image (1-based candidate index)
//! ├── music_metadata.json     # Per-category metadata
//! └── curation_report.json    # Summary across categories
//! ```
//!
//! Indices are the 1-based position of the candidate in the resolved list,
//! so a failed candidate leaves a gap (`music_1.webp`, `music_3.webp`).

/// File name of the summary report.
pub const REPORT_FILENAME: &str = "curation_report.json";

/// Raw download target: `<category>_temp_<n>.jpg`.
///
/// The extension is nominal; the optimizer sniffs the real format.
pub fn temp_filename(category: &str, index: usize) -> String {
    format!("{}_temp_{}.jpg", category, index)
}

/// Stem of the optimized output: `<category>_<n>`.
pub fn optimized_stem(category: &str, index: usize) -> String {
    format!("{}_{}", category, index)
}

/// Per-category metadata file: `<category>_metadata.json`.
pub fn metadata_filename(category: &str) -> String {
    format!("{}_metadata.json", category)
}

/// Placeholder overlay text for a category key.
///
/// Underscores become `+` (a URL-encoded space) and each word is
/// capitalized:
/// - `"digital_art"` → `"Digital+Art"`
/// - `"music"` → `"Music"`
pub fn overlay_text(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("+")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
