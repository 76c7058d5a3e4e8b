//! Multi-format decoding from streams and byte slices.

use std::io::{Cursor, Read};

use image::{ImageError, ImageFormat, ImageReader};

use super::orientation::{apply_orientation, get_orientation};
use super::{DecodeError, DecodeOptions, Raster};

/// Read `input` to exhaustion and decode it.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the stream fails, `DecodeError::Empty` if it
/// yields no bytes, and the errors of [`decode_bytes`] otherwise.
pub fn decode<R: Read>(mut input: R, options: &DecodeOptions) -> Result<Raster, DecodeError> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes).map_err(DecodeError::Io)?;
    decode_bytes(&bytes, options)
}

/// Decode an encoded image held in memory.
///
/// The format is guessed from the content, never from a file name.
///
/// # Errors
///
/// * `DecodeError::Empty` for a zero-length slice
/// * `DecodeError::InvalidFormat` if the format is unknown or not compiled in
/// * `DecodeError::TooLarge` if the header exceeds `options.max_input_pixels`
/// * `DecodeError::CorruptedFile` for truncated or malformed data
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Raster, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    if !format.reading_enabled() {
        return Err(DecodeError::InvalidFormat);
    }
    log::debug!("decoding {:?} input ({} bytes)", format, bytes.len());

    if format == ImageFormat::Jpeg {
        check_jpeg_complete(bytes)?;
    }

    if let Some(limit) = options.max_input_pixels {
        check_header_size(bytes, format, limit)?;
    }

    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(map_image_error)?;

    let img = if options.auto_orient {
        let orientation = get_orientation(bytes);
        log::trace!("applying EXIF orientation {:?}", orientation);
        apply_orientation(img, orientation)
    } else {
        img
    };

    let raster = Raster::from_dynamic(img);
    log::debug!(
        "decoded {}x{} {:?} raster",
        raster.width,
        raster.height,
        raster.layout
    );
    Ok(raster)
}

/// Reject oversized images from the header alone, before allocating pixels.
fn check_header_size(bytes: &[u8], format: ImageFormat, limit: u64) -> Result<(), DecodeError> {
    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(map_image_error)?;

    if u64::from(width) * u64::from(height) > limit {
        return Err(DecodeError::TooLarge {
            width,
            height,
            limit,
        });
    }
    Ok(())
}

/// The JPEG decoder pads a cut-off scan with gray instead of failing, so a
/// stream must end in an EOI marker. Trailing zero padding is tolerated.
fn check_jpeg_complete(bytes: &[u8]) -> Result<(), DecodeError> {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0x00)
        .map_or(0, |last| last + 1);

    if bytes[..end].ends_with(&[0xFF, 0xD9]) {
        Ok(())
    } else {
        Err(DecodeError::CorruptedFile(
            "JPEG stream ends before the end-of-image marker".to_string(),
        ))
    }
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        ImageError::Limits(_) => DecodeError::OutOfMemory,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}
