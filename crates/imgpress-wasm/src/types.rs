//! WASM-compatible wrapper types for compression results.

use imgpress_core::CompressReport;
use wasm_bindgen::prelude::*;

/// A compressed JPEG plus the dimensions it was produced from.
///
/// The bytes live in WASM memory. `bytes()` copies them into a JavaScript
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsCompressResult {
    source_width: u32,
    source_height: u32,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsCompressResult {
    /// Width of the decoded input in pixels
    #[wasm_bindgen(getter)]
    pub fn source_width(&self) -> u32 {
        self.source_width
    }

    /// Height of the decoded input in pixels
    #[wasm_bindgen(getter)]
    pub fn source_height(&self) -> u32 {
        self.source_height
    }

    /// Width of the JPEG in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the JPEG in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the JPEG as a Uint8Array (copied out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it eventually.
    pub fn free(self) {}
}

impl JsCompressResult {
    pub(crate) fn new(report: CompressReport, bytes: Vec<u8>) -> Self {
        Self {
            source_width: report.source_width,
            source_height: report.source_height,
            width: report.width,
            height: report.height,
            bytes,
        }
    }
}
