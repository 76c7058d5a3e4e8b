//! imgpress WASM - WebAssembly bindings for imgpress
//!
//! Exposes the imgpress-core compressor to JavaScript/TypeScript over byte
//! buffers.
//!
//! # Module Structure
//!
//! - `compress` - Compression bindings
//! - `types` - WASM-compatible wrapper for compression results
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@imgpress/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const jpeg = compress_image(bytes, 1280, 1280, 80);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod types;

pub use compress::{compress_image, compress_image_with};
pub use types::JsCompressResult;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
