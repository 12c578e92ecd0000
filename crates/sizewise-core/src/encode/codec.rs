//! Output encoding via the `image` crate's encoders.
//!
//! JPEG honours the quality setting; PNG, WebP (lossless) and TIFF ignore
//! it. `Raw` output returns the pixel bytes unchanged.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Format;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 80;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: Format, reason: String },
}

/// Channel layout of the pixel buffer handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 bytes per pixel.
    Rgb,
    /// 1 byte per pixel.
    Luma,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Luma => 1,
        }
    }

    fn color_type(self) -> ExtendedColorType {
        match self {
            PixelLayout::Rgb => ExtendedColorType::Rgb8,
            PixelLayout::Luma => ExtendedColorType::L8,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// JPEG quality (1-100); out-of-range values are clamped.
    pub quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Encode pixel data to `format`.
///
/// # Arguments
///
/// * `pixels` - Pixel data in row-major order, laid out per `layout`
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `layout` - RGB or single-channel luma
/// * `format` - Target container format
/// * `quality` - JPEG quality (1-100), ignored by other formats
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for zero dimensions,
/// `EncodeError::InvalidPixelData` when the buffer length does not match,
/// and `EncodeError::EncodingFailed` when the codec fails.
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    format: Format,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * layout.channels();
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let color = layout.color_type();
    let failed = |e: image::ImageError| EncodeError::EncodingFailed {
        format,
        reason: e.to_string(),
    };

    let mut buffer = Cursor::new(Vec::new());
    match format {
        Format::Raw => return Ok(pixels.to_vec()),
        Format::Jpeg => {
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
                .write_image(pixels, width, height, color)
                .map_err(failed)?;
        }
        Format::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(pixels, width, height, color)
                .map_err(failed)?;
        }
        Format::WebP => {
            WebPEncoder::new_lossless(&mut buffer)
                .write_image(pixels, width, height, color)
                .map_err(failed)?;
        }
        Format::Tiff => {
            TiffEncoder::new(&mut buffer)
                .write_image(pixels, width, height, color)
                .map_err(failed)?;
        }
    }

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(128);
            }
        }
        pixels
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode(&gradient(100, 100), 100, 100, PixelLayout::Rgb, Format::Jpeg, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode(&gradient(10, 10), 10, 10, PixelLayout::Rgb, Format::Png, 90).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_webp_signature() {
        let webp = encode(&gradient(10, 10), 10, 10, PixelLayout::Rgb, Format::WebP, 90).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_tiff_signature() {
        let tiff = encode(&gradient(10, 10), 10, 10, PixelLayout::Rgb, Format::Tiff, 90).unwrap();
        assert!(&tiff[0..2] == b"II" || &tiff[0..2] == b"MM");
    }

    #[test]
    fn test_encode_raw_passthrough() {
        let pixels = gradient(4, 3);
        let raw = encode(&pixels, 4, 3, PixelLayout::Rgb, Format::Raw, 90).unwrap();
        assert_eq!(raw, pixels);
    }

    #[test]
    fn test_encode_luma() {
        let pixels = vec![200u8; 32 * 24];
        let raw = encode(&pixels, 32, 24, PixelLayout::Luma, Format::Raw, 90).unwrap();
        assert_eq!(raw.len(), 768);

        let jpeg = encode(&pixels, 32, 24, PixelLayout::Luma, Format::Jpeg, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode(&pixels, 10, 10, PixelLayout::Rgb, Format::Jpeg, 0).is_ok());
        assert!(encode(&pixels, 10, 10, PixelLayout::Rgb, Format::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3]; // One row short
        let result = encode(&pixels, 100, 100, PixelLayout::Rgb, Format::Jpeg, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));

        // Luma buffers are checked against one channel
        let result = encode(&pixels, 100, 100, PixelLayout::Luma, Format::Png, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let result = encode(&[], 0, 100, PixelLayout::Rgb, Format::Png, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));

        let result = encode(&[], 100, 0, PixelLayout::Rgb, Format::Raw, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_options_default_quality() {
        assert_eq!(EncodeOptions::default().quality, 80);
        let options: EncodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.quality, DEFAULT_QUALITY);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
