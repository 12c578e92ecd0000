//! Image decoding for the resize pipeline.
//!
//! This module provides functionality for:
//! - Probing natural dimensions and format from the header
//! - Decoding JPEG, PNG, WebP and TIFF images to RGB8
//! - Shrink-on-load pre-passes for formats whose decoders support it
//!
//! # Architecture
//!
//! The `image` crate is the decoding backend. The resolver only needs the
//! natural dimensions, which [`probe`] reads without decoding pixels.
//!
//! # Examples
//!
//! ```ignore
//! use sizewise_core::decode::{decode, probe};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let meta = probe(&bytes).unwrap();
//! let (image, format) = decode(&bytes).unwrap();
//! assert_eq!((image.width, image.height), (meta.width, meta.height));
//! ```

mod reader;
mod shrink;
mod types;

pub use reader::{decode, probe};
pub use shrink::shrink_on_load;
pub use types::{DecodeError, DecodedImage, Format, ImageMetadata};
