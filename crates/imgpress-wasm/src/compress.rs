//! Compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_image`] - Bounds and quality in, JPEG bytes out
//! - [`compress_image_with`] - Full options object in, [`JsCompressResult`] out
//!
//! # Example
//!
//! ```typescript
//! import { compress_image, compress_image_with } from '@imgpress/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const jpeg = compress_image(bytes, 1280, 1280, 80);
//!
//! const result = compress_image_with(bytes, { max_width: 200, quality: 60, auto_orient: true });
//! console.log(`${result.source_width}x${result.source_height} -> ${result.width}x${result.height}`);
//! ```

use crate::types::JsCompressResult;
use imgpress_core::{compress_bytes, compress_with, CompressOptions};
use wasm_bindgen::prelude::*;

/// Compress an encoded image to JPEG.
///
/// # Arguments
///
/// * `bytes` - Encoded image (JPEG, PNG, GIF, BMP, TIFF or WebP) as a `Uint8Array`
/// * `max_width` - Maximum output width, 0 for unconstrained
/// * `max_height` - Maximum output height, 0 for unconstrained
/// * `quality` - JPEG quality (1-100)
///
/// # Errors
///
/// Returns an error string if the quality is out of range, the input cannot
/// be decoded, or encoding fails.
#[wasm_bindgen]
pub fn compress_image(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    let options = CompressOptions::new(max_width, max_height, quality);
    compress_bytes(bytes, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compress an encoded image with a full options object.
///
/// `options` is a plain object with any subset of `max_width`, `max_height`,
/// `quality`, `filter` (`"Nearest"`, `"Bilinear"`, `"CatmullRom"`,
/// `"Lanczos3"`), `mode` (`"Fit"`, `"Exact"`), `allow_upscale`,
/// `auto_orient`, `max_input_pixels` and `max_output_pixels`. Missing fields
/// take their defaults, so oversized exact or upscaled targets are refused
/// unless `max_output_pixels` is raised or set to `null`.
#[wasm_bindgen]
pub fn compress_image_with(bytes: &[u8], options: JsValue) -> Result<JsCompressResult, JsValue> {
    let options: CompressOptions = if options.is_undefined() || options.is_null() {
        CompressOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(JsValue::from)?
    };

    let mut output = Vec::new();
    let report = compress_with(bytes, &mut output, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(JsCompressResult::new(report, output))
}
