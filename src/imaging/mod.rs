//! Image processing: decode, flatten, fit, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with content sniffing |
//! | **Flatten** | alpha composite onto white |
//! | **Fit** | [`calculate_fit_dimensions`] + Lanczos3 resize |
//! | **Encode** | lossy WebP via `webp` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining a web spec + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{calculate_fit_dimensions, parse_aspect_ratio};
pub use operations::{optimize_image, plan_optimize};
pub use params::{OptimizeParams, Quality};
pub use rust_backend::RustBackend;
