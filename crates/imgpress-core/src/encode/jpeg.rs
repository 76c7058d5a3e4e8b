//! JPEG encoding to arbitrary writers.
//!
//! Uses the `image` crate's baseline JPEG encoder. Output is buffered and
//! flushed before returning, so a writer that fails late (closed pipe, full
//! disk) still surfaces as an error.

use std::io::{self, BufWriter, Write};

use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, ImageError};
use thiserror::Error;

use crate::decode::Raster;

/// Lowest accepted JPEG quality.
pub const MIN_QUALITY: u8 = 1;
/// Highest accepted JPEG quality.
pub const MAX_QUALITY: u8 = 100;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Quality outside 1-100.
    #[error("Invalid JPEG quality {0}: must be between 1 and 100")]
    InvalidQuality(u8),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The output stream rejected a write or flush.
    #[error("Failed to write JPEG output: {0}")]
    Write(#[source] io::Error),

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check that `quality` is within 1-100.
pub fn validate_quality(quality: u8) -> Result<(), EncodeError> {
    if (MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        Ok(())
    } else {
        Err(EncodeError::InvalidQuality(quality))
    }
}

/// Encode a raster as JPEG into `writer`.
///
/// # Arguments
///
/// * `raster` - RGB or grayscale pixels; grayscale produces a single-component JPEG
/// * `writer` - Destination stream
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// The number of bytes written.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 75-90: Good quality, recommended for most uses
/// * 50-75: Medium quality, acceptable for web/social media
/// * Below 50: Low quality, visible artifacts
///
/// # Errors
///
/// Parameter problems are reported before anything is written. After that,
/// `EncodeError::Write` means the writer failed and may hold partial output.
pub fn encode_jpeg<W: Write>(raster: &Raster, writer: W, quality: u8) -> Result<u64, EncodeError> {
    validate_quality(quality)?;

    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = raster.expected_len().unwrap_or(usize::MAX);
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }

    let mut output = CountingWriter::new(BufWriter::new(writer));

    JpegEncoder::new_with_quality(&mut output, quality)
        .write_image(&raster.pixels, width, height, raster.layout.color_type())
        .map_err(map_image_error)?;
    output.flush().map_err(EncodeError::Write)?;

    log::debug!(
        "encoded {}x{} JPEG at quality {} ({} bytes)",
        width,
        height,
        quality,
        output.written
    );
    Ok(output.written)
}

/// Encode a raster as JPEG into a new buffer.
pub fn encode_jpeg_to_vec(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    encode_jpeg(raster, &mut buffer, quality)?;
    Ok(buffer)
}

fn map_image_error(err: ImageError) -> EncodeError {
    match err {
        ImageError::IoError(e) => EncodeError::Write(e),
        other => EncodeError::EncodingFailed(other.to_string()),
    }
}

/// Writer adapter that counts accepted bytes.
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
