//! Executing a resolved geometry against pixel data.

use crate::decode::DecodedImage;
use crate::resolve::ResizeGeometry;

use super::{embed, extract_area, resample};

/// Apply `geometry` to `image`.
///
/// The input may be the full decoded source or a buffer pre-shrunk on load;
/// either way it is scaled to `geometry.resize_to` first.
///
/// # Algorithm
/// 1. Resample to `resize_to` using the geometry's sampling convention
/// 2. Keep the `crop` rectangle, if any
/// 3. Add `padding`, if any
///
/// The result always measures `geometry.output`.
pub fn apply_geometry(image: &DecodedImage, geometry: &ResizeGeometry) -> DecodedImage {
    let mut current = resample(image, geometry.resize_to, geometry.sampling);

    if let Some(rect) = geometry.crop {
        current = extract_area(&current, rect);
    }
    if let Some(padding) = geometry.padding {
        current = embed(&current, padding);
    }

    current
}
