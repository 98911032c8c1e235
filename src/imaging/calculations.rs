//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the largest size that fits inside `bounds` while keeping the
/// source aspect ratio.
///
/// Images already inside the bounds are returned unchanged: the optimizer
/// shrinks, it never enlarges.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Maximum output dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Output dimensions, each at least 1 and within bounds
///
/// # Examples
/// ```
/// # use image_curator::imaging::calculate_fit_dimensions;
/// // 800x600 into 400x300 → exact 4:3 fit
/// assert_eq!(calculate_fit_dimensions((800, 600), (400, 300)), (400, 300));
///
/// // Portrait source is limited by height
/// assert_eq!(calculate_fit_dimensions((600, 800), (400, 300)), (225, 300));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w == 0 || src_h == 0 || (src_w <= max_w && src_h <= max_h) {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Parse a `W:H` aspect ratio string.
///
/// Returns `None` unless both parts are positive integers.
///
/// ```
/// # use image_curator::imaging::parse_aspect_ratio;
/// assert_eq!(parse_aspect_ratio("4:3"), Some((4, 3)));
/// assert_eq!(parse_aspect_ratio("16 : 9"), Some((16, 9)));
/// assert_eq!(parse_aspect_ratio("0:1"), None);
/// ```
pub fn parse_aspect_ratio(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once(':')?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}
