//! Resize stage: fit a [`Raster`](crate::decode::Raster) within bounding dimensions.
//!
//! # Policy
//!
//! The default is fit-within: aspect ratio is preserved and the image is never
//! enlarged. A bound of `0` leaves that axis unconstrained, so `(0, 300)`
//! scales to a height of 300 and whatever width keeps the ratio. `(0, 0)`
//! keeps the source size.
//!
//! `ResizeMode::Exact` stretches to the bounds instead, for callers that
//! want the output size fixed regardless of the source ratio.
//!
//! Both `Exact` and upscaling can ask for far more pixels than the source
//! has. `ResizeOptions::max_output_pixels` caps that before anything is
//! allocated.

mod calculations;
mod ops;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use calculations::{exact_dimensions, fit_dimensions};
pub use ops::{resize, resize_to_bounds, target_dimensions};

/// Errors that can occur while resizing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResizeError {
    /// A target edge is zero.
    #[error("Invalid target dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The raster's pixel buffer does not match its dimensions.
    #[error("Pixel buffer of {actual} bytes does not match a {width}x{height} raster")]
    BufferMismatch { width: u32, height: u32, actual: usize },

    /// The resize would need more pixels than the caller allows.
    #[error("Resizing to {width}x{height} needs {pixels} pixels, which exceeds the limit of {limit}")]
    TooLarge {
        width: u32,
        height: u32,
        pixels: u64,
        limit: u64,
    },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Catmull-Rom bicubic interpolation.
    CatmullRom,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// How bounds are turned into output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeMode {
    /// Scale to fit inside the bounds, preserving aspect ratio.
    #[default]
    Fit,
    /// Resize to exactly the bounds. A zero bound is derived proportionally.
    Exact,
}

/// Knobs for the resize stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeOptions {
    pub filter: FilterType,
    pub mode: ResizeMode,
    /// Let `Fit` enlarge images smaller than the bounds. Ignored by `Exact`.
    pub allow_upscale: bool,
    /// Refuse resizes whose output or intermediate pass exceeds this many pixels.
    pub max_output_pixels: Option<u64>,
}
