//! Core types for the decode stage.

use image::{DynamicImage, ExtendedColorType, GrayImage, LumaA, RgbImage, Rgba};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input stream held no bytes at all.
    #[error("Input is empty")]
    Empty,

    /// Reading the input stream failed.
    #[error("I/O error while reading input: {0}")]
    Io(#[source] std::io::Error),

    /// The format is not recognized or no decoder for it is compiled in.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image header declares more pixels than the caller allows.
    #[error("Image is {width}x{height}, which exceeds the limit of {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },

    /// The decoder refused to allocate the pixel buffer.
    #[error("Out of memory during decoding")]
    OutOfMemory,
}

/// Knobs for the decode stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Rotate/flip according to the EXIF orientation tag.
    pub auto_orient: bool,
    /// Reject images whose header declares more pixels than this.
    pub max_input_pixels: Option<u64>,
}

/// Memory layout of a [`Raster`]'s pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelLayout {
    /// 3 bytes per pixel: red, green, blue.
    #[default]
    Rgb8,
    /// 1 byte per pixel: luminance.
    Luma8,
}

impl PixelLayout {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Luma8 => 1,
        }
    }

    /// The color type the encoder is told the buffer holds.
    pub fn color_type(self) -> ExtendedColorType {
        match self {
            PixelLayout::Rgb8 => ExtendedColorType::Rgb8,
            PixelLayout::Luma8 => ExtendedColorType::L8,
        }
    }
}

/// A decoded image held in memory.
///
/// Created by decoding, replaced by resizing, consumed by encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// How `pixels` is laid out.
    pub layout: PixelLayout,
    /// Pixel data in row-major order.
    /// Length should be `width * height * layout.channels()`.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            Some(pixels.len()),
            expected_len(width, height, layout),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: PixelLayout::Rgb8,
            pixels: img.into_raw(),
        }
    }

    pub fn from_gray_image(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: PixelLayout::Luma8,
            pixels: img.into_raw(),
        }
    }

    /// Convert whatever the decoder produced into a raster.
    ///
    /// Grayscale sources (with or without alpha, any bit depth) become
    /// `Luma8`; everything else becomes `Rgb8`. Translucent pixels are
    /// composited onto black, so a fully transparent pixel is black whatever
    /// color it stores.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let has_alpha = img.color().has_alpha();
        match img {
            DynamicImage::ImageLuma8(gray) => Self::from_gray_image(gray),
            DynamicImage::ImageRgb8(rgb) => Self::from_rgb_image(rgb),
            DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
                let la = img.into_luma_alpha8();
                let (width, height) = la.dimensions();
                let pixels = la
                    .pixels()
                    .map(|&LumaA([l, a])| premultiply(l, a))
                    .collect();
                Self::new(width, height, PixelLayout::Luma8, pixels)
            }
            DynamicImage::ImageLuma16(_) => Self::from_gray_image(img.into_luma8()),
            other if has_alpha => {
                let rgba = other.into_rgba8();
                let (width, height) = rgba.dimensions();
                let pixels = rgba
                    .pixels()
                    .flat_map(|&Rgba([r, g, b, a])| {
                        [premultiply(r, a), premultiply(g, a), premultiply(b, a)]
                    })
                    .collect();
                Self::new(width, height, PixelLayout::Rgb8, pixels)
            }
            other => Self::from_rgb_image(other.into_rgb8()),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Buffer length implied by the dimensions and layout, or `None` on overflow.
    pub fn expected_len(&self) -> Option<usize> {
        expected_len(self.width, self.height, self.layout)
    }

    /// Whether the pixel buffer matches the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.expected_len() == Some(self.pixels.len())
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Scale a channel by its alpha, rounding to nearest.
#[inline]
fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}

fn expected_len(width: u32, height: u32, layout: PixelLayout) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(layout.channels())
}
