//! Compression settings.
//!
//! [`CompressOptions`] bundles every knob of the pipeline into one
//! serde-friendly value. Missing fields deserialize to their defaults, so
//! `{"max_width": 200}` is a complete configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeOptions;
use crate::encode::{MAX_QUALITY, MIN_QUALITY};
use crate::resize::{FilterType, ResizeMode, ResizeOptions};

/// JPEG quality used when none is given.
pub const DEFAULT_QUALITY: u8 = 75;

/// Largest resize the pipeline performs unless told otherwise (50 megapixels).
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 50_000_000;

/// Errors raised by [`CompressOptions::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    #[error("{0} must be greater than zero when set")]
    ZeroPixelLimit(&'static str),
}

/// Settings for a single compression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressOptions {
    /// Maximum output width in pixels, 0 for unconstrained.
    pub max_width: u32,
    /// Maximum output height in pixels, 0 for unconstrained.
    pub max_height: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Resampling filter
    pub filter: FilterType,
    pub mode: ResizeMode,
    /// Enlarge images smaller than the bounds (only for `ResizeMode::Fit`).
    pub allow_upscale: bool,
    /// Apply the EXIF orientation tag before resizing.
    pub auto_orient: bool,
    /// Refuse inputs whose header declares more pixels than this.
    pub max_input_pixels: Option<u64>,
    /// Refuse resizes that would produce more pixels than this. `None` lifts the cap.
    pub max_output_pixels: Option<u64>,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_width: 0,
            max_height: 0,
            quality: DEFAULT_QUALITY,
            filter: FilterType::default(),
            mode: ResizeMode::default(),
            allow_upscale: false,
            auto_orient: false,
            max_input_pixels: None,
            max_output_pixels: Some(DEFAULT_MAX_OUTPUT_PIXELS),
        }
    }
}

impl CompressOptions {
    /// Options for the common case: bounds and quality, everything else default.
    pub fn new(max_width: u32, max_height: u32, quality: u8) -> Self {
        Self {
            max_width,
            max_height,
            quality,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mode(mut self, mode: ResizeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_upscale(mut self, allow_upscale: bool) -> Self {
        self.allow_upscale = allow_upscale;
        self
    }

    pub fn with_auto_orient(mut self, auto_orient: bool) -> Self {
        self.auto_orient = auto_orient;
        self
    }

    pub fn with_max_input_pixels(mut self, limit: u64) -> Self {
        self.max_input_pixels = Some(limit);
        self
    }

    pub fn with_max_output_pixels(mut self, limit: Option<u64>) -> Self {
        self.max_output_pixels = limit;
        self
    }

    /// Check every field that can be out of range.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(OptionsError::InvalidQuality(self.quality));
        }
        if self.max_input_pixels == Some(0) {
            return Err(OptionsError::ZeroPixelLimit("max_input_pixels"));
        }
        if self.max_output_pixels == Some(0) {
            return Err(OptionsError::ZeroPixelLimit("max_output_pixels"));
        }
        Ok(())
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            auto_orient: self.auto_orient,
            max_input_pixels: self.max_input_pixels,
        }
    }

    pub fn resize_options(&self) -> ResizeOptions {
        ResizeOptions {
            filter: self.filter,
            mode: self.mode,
            allow_upscale: self.allow_upscale,
            max_output_pixels: self.max_output_pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompressOptions::default();

        assert_eq!(options.bounds(), (0, 0));
        assert_eq!(options.quality, DEFAULT_QUALITY);
        assert_eq!(options.filter, FilterType::Lanczos3);
        assert_eq!(options.mode, ResizeMode::Fit);
        assert!(!options.allow_upscale);
        assert!(!options.auto_orient);
        assert_eq!(options.max_input_pixels, None);
        assert_eq!(options.max_output_pixels, Some(DEFAULT_MAX_OUTPUT_PIXELS));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_new_sets_bounds_and_quality() {
        let options = CompressOptions::new(200, 100, 80);
        assert_eq!(options.bounds(), (200, 100));
        assert_eq!(options.quality, 80);
    }

    #[test]
    fn test_builder_setters() {
        let options = CompressOptions::new(10, 10, 50)
            .with_filter(FilterType::CatmullRom)
            .with_mode(ResizeMode::Exact)
            .with_upscale(true)
            .with_auto_orient(true)
            .with_max_input_pixels(1_000_000)
            .with_max_output_pixels(Some(4_000_000));

        assert_eq!(
            options.resize_options(),
            ResizeOptions {
                filter: FilterType::CatmullRom,
                mode: ResizeMode::Exact,
                allow_upscale: true,
                max_output_pixels: Some(4_000_000),
            }
        );
        assert_eq!(
            options.decode_options(),
            DecodeOptions {
                auto_orient: true,
                max_input_pixels: Some(1_000_000),
            }
        );
    }

    #[test]
    fn test_validate_quality_range() {
        assert_eq!(
            CompressOptions::new(0, 0, 0).validate(),
            Err(OptionsError::InvalidQuality(0))
        );
        assert_eq!(
            CompressOptions::new(0, 0, 101).validate(),
            Err(OptionsError::InvalidQuality(101))
        );
        assert!(CompressOptions::new(0, 0, 1).validate().is_ok());
        assert!(CompressOptions::new(0, 0, 100).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_pixel_limit() {
        let options = CompressOptions::default().with_max_input_pixels(0);
        assert_eq!(
            options.validate(),
            Err(OptionsError::ZeroPixelLimit("max_input_pixels"))
        );

        let options = CompressOptions::default().with_max_output_pixels(Some(0));
        assert_eq!(
            options.validate(),
            Err(OptionsError::ZeroPixelLimit("max_output_pixels"))
        );
    }

    #[test]
    fn test_json_null_lifts_output_cap() {
        let defaulted: CompressOptions = serde_json::from_str(r#"{"mode": "Exact"}"#).unwrap();
        assert_eq!(defaulted.max_output_pixels, Some(DEFAULT_MAX_OUTPUT_PIXELS));

        let lifted: CompressOptions =
            serde_json::from_str(r#"{"max_output_pixels": null}"#).unwrap();
        assert_eq!(lifted.max_output_pixels, None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            OptionsError::InvalidQuality(0).to_string(),
            "JPEG quality must be between 1 and 100, got 0"
        );
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: CompressOptions =
            serde_json::from_str(r#"{"max_width": 200, "filter": "Bilinear"}"#).unwrap();

        assert_eq!(options.bounds(), (200, 0));
        assert_eq!(options.filter, FilterType::Bilinear);
        assert_eq!(options.quality, DEFAULT_QUALITY);
    }

    #[test]
    fn test_json_round_trip() {
        let options = CompressOptions::new(640, 480, 85).with_mode(ResizeMode::Exact);
        let json = serde_json::to_string(&options).unwrap();
        let back: CompressOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
