//! Encode stage: [`Raster`](crate::decode::Raster) in, JPEG bytes out.
//!
//! Quality is validated, never clamped: anything outside 1-100 is an error
//! raised before a single byte reaches the writer.

mod jpeg;

pub use jpeg::{
    encode_jpeg, encode_jpeg_to_vec, validate_quality, EncodeError, MAX_QUALITY, MIN_QUALITY,
};
