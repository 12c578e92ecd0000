//! Image encoding for the resize pipeline.
//!
//! This module provides functionality for:
//! - Encoding RGB or greyscale pixels to JPEG, PNG, WebP or TIFF
//! - Passing raw pixel bytes through unchanged
//!
//! # Examples
//!
//! ```ignore
//! use sizewise_core::decode::Format;
//! use sizewise_core::encode::{encode, PixelLayout};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg = encode(&pixels, 100, 100, PixelLayout::Rgb, Format::Jpeg, 90).unwrap();
//! println!("Encoded {} bytes", jpeg.len());
//! ```

mod codec;

pub use codec::{encode, EncodeError, EncodeOptions, PixelLayout, DEFAULT_QUALITY};
