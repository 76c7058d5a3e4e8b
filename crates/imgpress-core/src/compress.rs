//! The decode → resize → encode pipeline.

use std::io::{Read, Write};

use thiserror::Error;

use crate::decode::{self, DecodeError, Raster};
use crate::encode::{self, EncodeError};
use crate::options::{CompressOptions, OptionsError};
use crate::resize::{self, ResizeError};

/// Errors from any stage of [`compress`].
///
/// On `InvalidOptions`, `Decode` and `Resize` nothing has been written to the
/// output. On `Encode` the output may hold partial bytes and should be
/// discarded.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Resize failed: {0}")]
    Resize(#[from] ResizeError),

    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),
}

/// What a successful compression did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressReport {
    pub source_width: u32,
    pub source_height: u32,
    pub width: u32,
    pub height: u32,
    pub bytes_written: u64,
}

/// Decode `input`, fit it within `max_width` x `max_height` and write it to
/// `output` as JPEG at `quality`.
///
/// A bound of `0` leaves that dimension unconstrained. Aspect ratio is
/// preserved, images are never enlarged, and resampling uses Lanczos3. Use
/// [`compress_with`] to change any of that.
///
/// # Errors
///
/// * `CompressError::InvalidOptions` if `quality` is outside 1-100
/// * `CompressError::Decode` for empty, truncated or unrecognized input
/// * `CompressError::Resize` if the resize would exceed the default output pixel cap
/// * `CompressError::Encode` if `output` rejects a write
pub fn compress<R: Read, W: Write>(
    input: R,
    output: W,
    max_width: u32,
    max_height: u32,
    quality: u8,
) -> Result<(), CompressError> {
    let options = CompressOptions::new(max_width, max_height, quality);
    compress_with(input, output, &options).map(|_| ())
}

/// Like [`compress`], with every setting explicit.
///
/// Options are validated before `input` is read.
pub fn compress_with<R: Read, W: Write>(
    input: R,
    output: W,
    options: &CompressOptions,
) -> Result<CompressReport, CompressError> {
    options.validate()?;
    let raster = decode::decode(input, &options.decode_options())?;
    finish(raster, output, options)
}

/// Compress an in-memory image into a new buffer.
pub fn compress_bytes(bytes: &[u8], options: &CompressOptions) -> Result<Vec<u8>, CompressError> {
    options.validate()?;
    let raster = decode::decode_bytes(bytes, &options.decode_options())?;

    let mut output = Vec::new();
    finish(raster, &mut output, options)?;
    Ok(output)
}

fn finish<W: Write>(
    raster: Raster,
    output: W,
    options: &CompressOptions,
) -> Result<CompressReport, CompressError> {
    let (source_width, source_height) = raster.dimensions();
    let raster = resize::resize_to_bounds(raster, options.bounds(), &options.resize_options())?;
    let bytes_written = encode::encode_jpeg(&raster, output, options.quality)?;

    log::debug!(
        "compressed {}x{} -> {}x{} ({} bytes, quality {})",
        source_width,
        source_height,
        raster.width,
        raster.height,
        bytes_written,
        options.quality
    );

    Ok(CompressReport {
        source_width,
        source_height,
        width: raster.width,
        height: raster.height,
        bytes_written,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use proptest::prelude::*;
    use std::io::Cursor;

    fn noisy_png(width: u32, height: u32, seed: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = (x.wrapping_mul(2654435761) ^ y.wrapping_mul(40503) ^ seed) >> 3;
            Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Property: Any valid image with valid parameters yields a decodable
        /// JPEG inside the bounds.
        #[test]
        fn prop_output_is_decodable_and_bounded(
            (width, height) in (1u32..=48, 1u32..=48),
            (max_w, max_h) in (1u32..=32, 1u32..=32),
            quality in 1u8..=100,
            seed in any::<u32>(),
        ) {
            let input = noisy_png(width, height, seed);
            let mut out = Vec::new();

            let report = compress(input.as_slice(), &mut out, max_w, max_h, quality);
            prop_assert!(report.is_ok(), "{:?}", report);

            let decoded = image::load_from_memory_with_format(&out, ImageFormat::Jpeg);
            prop_assert!(decoded.is_ok());
            let decoded = decoded.unwrap();
            prop_assert!(decoded.width() <= max_w && decoded.height() <= max_h);
            prop_assert!(decoded.width() <= width && decoded.height() <= height);
        }

        /// Property: Garbage input is a decode error and writes nothing.
        #[test]
        fn prop_garbage_is_decode_error(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            // Skip the rare vector that happens to start with a real signature
            prop_assume!(image::guess_format(&bytes).is_err());

            let mut out = Vec::new();
            let result = compress(bytes.as_slice(), &mut out, 10, 10, 80);
            prop_assert!(matches!(result, Err(CompressError::Decode(_))));
            prop_assert!(out.is_empty());
        }
    }
}
