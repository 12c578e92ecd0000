//! Shrink-on-load: integer downsampling applied right after decode.
//!
//! Codecs such as JPEG and WebP can decode at 1/2, 1/4 or 1/8 scale far
//! faster than a full-size decode followed by a resize. This module emulates
//! that pre-pass. The pre-shrunk buffer is only ever an input to the
//! resampler; output geometry is never derived from its dimensions.

use image::imageops::{self, FilterType};

use super::{DecodeError, DecodedImage};

/// Downsample by an integer `factor`.
///
/// Output dimensions are `ceil(width / factor)` × `ceil(height / factor)`.
/// A factor of 0 or 1 returns a copy.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the pixel buffer does not match
/// the image dimensions.
pub fn shrink_on_load(image: &DecodedImage, factor: u32) -> Result<DecodedImage, DecodeError> {
    if factor <= 1 || image.is_empty() {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let shrunk = imageops::resize(
        &rgb_image,
        image.width.div_ceil(factor),
        image.height.div_ceil(factor),
        FilterType::Triangle,
    );

    Ok(DecodedImage::from_rgb_image(shrunk))
}
