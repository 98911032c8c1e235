//! # Image Curator
//!
//! Fetches representative images for a fixed set of marketplace categories,
//! normalizes them to one web format, and records where every image came
//! from. The result is a directory of `<category>_<n>.webp` files plus JSON
//! metadata, ready to drop into a site's assets.
//!
//! # Pipeline
//!
//! Each category runs through the same stages, strictly in sequence:
//!
//! ```text
//! 1. Resolve    category  →  candidate records   (Unsplash, then placeholders)
//! 2. Download   record    →  <cat>_temp_<n>.jpg  (scoped, removed after use)
//! 3. Optimize   temp file →  <cat>_<n>.webp      (white composite, fit, WebP)
//! 4. Record     images    →  <cat>_metadata.json
//! ```
//!
//! After the last category a `curation_report.json` summarizes the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`curate`] | The run: category selection, per-image loop, failure containment, progress events |
//! | [`provider`] | Candidate sources: Unsplash search and synthesized placeholders, chained by priority |
//! | [`download`] | Blocking HTTP fetch into a temp file that deletes itself on drop |
//! | [`imaging`] | Pure-Rust decode, alpha flattening, Lanczos3 fit, WebP encode |
//! | [`metadata`] | Per-category metadata and summary report documents |
//! | [`config`] | `curator.toml` loading, merging over stock defaults, and validation |
//! | [`types`] | Records shared between stages (`ImageRecord`, `OptimizedImage`) |
//! | [`naming`] | Output file naming and placeholder overlay text |
//! | [`output`] | CLI output formatting for progress, summary, and category listing |
//!
//! # Design Decisions
//!
//! ## Recoverable by Default
//!
//! A missing API key, a rate-limited search, a dead URL, or an undecodable
//! download never stops the run. Each becomes a progress event and the image
//! is simply absent from the results. Only failures that make the output
//! meaningless are fatal: an invalid config, an output directory that cannot
//! be created, or a summary report that cannot be written.
//!
//! ## Provider Chain
//!
//! Sources implement [`provider::ImageProvider`] and are consulted in order
//! until the category has enough candidates. The placeholder provider never
//! needs the network to produce records, so a run without credentials still
//! produces a complete set of images.
//!
//! ## One Immutable Config
//!
//! [`config::CuratorConfig`] is built once at startup from stock defaults and
//! an optional `curator.toml`, validated, and passed by reference. Every base
//! URL is configurable, which is also how the test suite points the whole
//! pipeline at a local server.

pub mod config;
pub mod curate;
pub mod download;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod provider;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
