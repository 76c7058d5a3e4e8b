//! Decode stage: encoded bytes in, [`Raster`] out.
//!
//! Supported inputs are whatever the `image` crate has decoders compiled in
//! for: JPEG, PNG, GIF, BMP, TIFF and WebP. The format is sniffed from the
//! leading bytes. Only the first frame of an animated GIF or WebP is used.
//!
//! Grayscale sources decode to a single-channel raster so the JPEG written
//! later stays single-component; everything else decodes to 8-bit RGB.
//! Alpha is composited onto black.
//!
//! A JPEG must end in its end-of-image marker. The decoder would otherwise
//! fill a cut-off scan with gray and report success.

mod orientation;
mod reader;
mod types;

pub use orientation::{get_orientation, Orientation};
pub use reader::{decode, decode_bytes};
pub use types::{DecodeError, DecodeOptions, PixelLayout, Raster};
