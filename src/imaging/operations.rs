//! High-level image operations.
//!
//! These functions turn a [`WebSpec`] into concrete parameters and call the
//! backend.

use super::backend::{BackendError, ImageBackend};
use super::params::{OptimizeParams, Quality};
use crate::config::WebSpec;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Plan an optimization without executing it.
///
/// The output lands in `output_dir` as `<stem>.<ext>`, with the extension
/// taken from the spec's format.
pub fn plan_optimize(
    source: &Path,
    output_dir: &Path,
    stem: &str,
    spec: &WebSpec,
) -> OptimizeParams {
    OptimizeParams {
        source: source.to_path_buf(),
        output: output_dir.join(format!("{}.{}", stem, spec.format.extension())),
        max_width: spec.width,
        max_height: spec.height,
        quality: Quality::new(spec.quality),
    }
}

/// Optimize one downloaded image for the web.
///
/// Returns the path of the written file.
pub fn optimize_image(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    stem: &str,
    spec: &WebSpec,
) -> Result<PathBuf> {
    let params = plan_optimize(source, output_dir, stem, spec);
    backend.optimize(&params)?;
    Ok(params.output)
}
