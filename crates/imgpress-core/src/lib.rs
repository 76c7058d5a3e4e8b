//! imgpress core - decode an image, fit it within bounds, re-encode as JPEG
//!
//! The whole crate is one linear pipeline:
//!
//! 1. [`decode`] reads any supported format into a [`Raster`]
//! 2. [`resize`] scales it to fit the bounding box (Lanczos3, no upscaling)
//! 3. [`encode`] writes it out as JPEG at the requested quality
//!
//! [`compress`] runs all three. Everything is synchronous and keeps no state
//! between calls, so concurrent calls on distinct streams are independent.
//!
//! Progress is reported through the `log` facade at debug/trace level; the
//! crate never installs a logger itself.

mod compress;
pub mod decode;
pub mod encode;
pub mod options;
pub mod resize;

pub use compress::{compress, compress_bytes, compress_with, CompressError, CompressReport};
pub use decode::{DecodeError, PixelLayout, Raster};
pub use encode::EncodeError;
pub use options::{CompressOptions, OptionsError, DEFAULT_MAX_OUTPUT_PIXELS, DEFAULT_QUALITY};
pub use resize::{FilterType, ResizeError, ResizeMode};
