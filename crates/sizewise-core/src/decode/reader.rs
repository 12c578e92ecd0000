//! Image decoding and header probing via the `image` crate.

use std::io::Cursor;

use image::ImageReader;
use tracing::debug;

use super::{DecodeError, DecodedImage, Format, ImageMetadata};

fn reader(bytes: &[u8]) -> Result<(ImageReader<Cursor<&[u8]>>, Format), DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader
        .format()
        .and_then(Format::from_image_format)
        .ok_or(DecodeError::InvalidFormat)?;

    Ok((reader, format))
}

/// Read natural dimensions and format from the header only.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized, or
/// `DecodeError::CorruptedFile` if the header cannot be read.
pub fn probe(bytes: &[u8]) -> Result<ImageMetadata, DecodeError> {
    let (reader, format) = reader(bytes)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(ImageMetadata {
        width,
        height,
        format,
    })
}

/// Decode an image to RGB8, returning it together with its detected format.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized, or
/// `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode(bytes: &[u8]) -> Result<(DecodedImage, Format), DecodeError> {
    let (reader, format) = reader(bytes)?;
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let decoded = DecodedImage::from_rgb_image(img.into_rgb8());
    debug!(
        "Decoded {} image: {}x{}",
        format, decoded.width, decoded.height
    );
    Ok((decoded, format))
}
