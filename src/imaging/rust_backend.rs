//! Pure Rust decoding and resizing, libwebp for the lossy WebP encode.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP) | `image` crate, format sniffed from content |
//! | Transparency removal | alpha-composite onto opaque white |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → WebP | `webp::Encoder` (lossy, quality 1–100) |
//!
//! Downloads are saved under a nominal `.jpg` name whatever the host
//! actually served, so decoding never trusts the extension.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_fit_dimensions;
use super::params::OptimizeParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, Rgb, RgbImage, Rgba};
use std::path::Path;

/// Production backend using the `image` and `webp` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, guessing the format from its leading
/// bytes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// Convert to opaque RGB, compositing any alpha channel onto white.
///
/// Paletted sources arrive here already expanded to RGB(A) by the decoder.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Save an RGB image to the given path, inferring format from extension.
fn save_image(img: &RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "webp" => save_webp(img, path, quality),
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            other
        ))),
    }
}

/// Encode and save as lossy WebP.
fn save_webp(img: &RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let encoded = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {:?}", e)))?;
    std::fs::write(path, &*encoded)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn optimize(&self, params: &OptimizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let flat = flatten_onto_white(&img);

        let (width, height) = calculate_fit_dimensions(
            (flat.width(), flat.height()),
            (params.max_width, params.max_height),
        );
        let fitted = if (width, height) == flat.dimensions() {
            flat
        } else {
            image::imageops::resize(&flat, width, height, FilterType::Lanczos3)
        };

        save_image(&fitted, &params.output, params.quality.value())
    }
}
