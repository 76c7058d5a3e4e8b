//! Resampling of [`Raster`]s using the `image` crate's filters.

use image::{imageops, ImageBuffer, Luma, Pixel, Rgb};

use super::calculations::{exact_dimensions, fit_dimensions};
use super::{FilterType, ResizeError, ResizeMode, ResizeOptions};
use crate::decode::{PixelLayout, Raster};

/// Resize a raster to exact dimensions.
///
/// Returns a clone when the raster already has the requested size.
///
/// # Errors
///
/// Returns `ResizeError::InvalidDimensions` for a zero target edge and
/// `ResizeError::BufferMismatch` if the raster's buffer does not match its
/// declared dimensions.
pub fn resize(
    raster: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions { width, height });
    }

    if raster.dimensions() == (width, height) {
        return Ok(raster.clone());
    }

    let filter = filter.to_image_filter();
    match raster.layout {
        PixelLayout::Rgb8 => {
            let src = borrow_buffer::<Rgb<u8>>(raster)?;
            Ok(Raster::from_rgb_image(imageops::resize(
                &src, width, height, filter,
            )))
        }
        PixelLayout::Luma8 => {
            let src = borrow_buffer::<Luma<u8>>(raster)?;
            Ok(Raster::from_gray_image(imageops::resize(
                &src, width, height, filter,
            )))
        }
    }
}

/// Compute the output dimensions for `source` under `bounds` and `options`.
pub fn target_dimensions(
    source: (u32, u32),
    bounds: (u32, u32),
    options: &ResizeOptions,
) -> (u32, u32) {
    match options.mode {
        ResizeMode::Fit => fit_dimensions(source, bounds, options.allow_upscale),
        ResizeMode::Exact => exact_dimensions(source, bounds),
    }
}

/// Resize a raster to satisfy `bounds`, consuming it.
///
/// The raster is handed back untouched when no resize is needed.
///
/// # Errors
///
/// Returns `ResizeError::TooLarge` when the resize would exceed
/// `options.max_output_pixels`, plus the errors of [`resize`].
pub fn resize_to_bounds(
    raster: Raster,
    bounds: (u32, u32),
    options: &ResizeOptions,
) -> Result<Raster, ResizeError> {
    let source = raster.dimensions();
    let (width, height) = target_dimensions(source, bounds, options);

    if (width, height) == source {
        log::trace!("{}x{} already satisfies bounds, skipping resize", source.0, source.1);
        return Ok(raster);
    }

    if let Some(limit) = options.max_output_pixels {
        check_pixel_budget(source, (width, height), limit)?;
    }

    log::debug!(
        "resizing {}x{} -> {}x{} with {:?}",
        source.0,
        source.1,
        width,
        height,
        options.filter
    );
    resize(&raster, width, height, options.filter)
}

/// The vertical pass of `imageops::resize` runs at source width and target
/// height, so that area counts along with the output itself.
fn check_pixel_budget(
    source: (u32, u32),
    (width, height): (u32, u32),
    limit: u64,
) -> Result<(), ResizeError> {
    let pixels = u64::from(width.max(source.0)) * u64::from(height);
    if pixels > limit {
        return Err(ResizeError::TooLarge {
            width,
            height,
            pixels,
            limit,
        });
    }
    Ok(())
}

/// View a raster's pixels as an image buffer without copying.
fn borrow_buffer<P>(raster: &Raster) -> Result<ImageBuffer<P, &[u8]>, ResizeError>
where
    P: Pixel<Subpixel = u8>,
{
    ImageBuffer::from_raw(raster.width, raster.height, raster.pixels.as_slice()).ok_or(
        ResizeError::BufferMismatch {
            width: raster.width,
            height: raster.height,
            actual: raster.pixels.len(),
        },
    )
}
