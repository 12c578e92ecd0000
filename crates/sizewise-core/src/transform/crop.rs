//! Cropping and padding in pixel coordinates.
//!
//! Both operations run on the intermediate image produced by the
//! resampler. Rectangles and padding come straight from the resolved
//! geometry.
//!
//! # Example
//!
//! ```
//! use sizewise_core::decode::DecodedImage;
//! use sizewise_core::resolve::{Padding, Rect};
//! use sizewise_core::transform::{embed, extract_area};
//!
//! let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
//!
//! let cropped = extract_area(&image, Rect::new(25, 25, 50, 50));
//! assert_eq!((cropped.width, cropped.height), (50, 50));
//!
//! let padded = embed(&cropped, Padding { top: 2, right: 0, bottom: 2, left: 0 });
//! assert_eq!((padded.width, padded.height), (50, 54));
//! ```

use crate::decode::DecodedImage;
use crate::resolve::{Padding, Rect};

/// Extract a rectangular region.
///
/// # Behavior
///
/// - A rectangle covering the whole image returns a copy
/// - A rectangle extending past the image is clamped to its bounds
/// - Minimum output dimension is 1x1 pixels
pub fn extract_area(image: &DecodedImage, rect: Rect) -> DecodedImage {
    // Fast path: full crop returns a clone
    if rect.x == 0 && rect.y == 0 && rect.width >= image.width && rect.height >= image.height {
        return image.clone();
    }

    let px_left = rect.x.min(image.width.saturating_sub(1));
    let px_top = rect.y.min(image.height.saturating_sub(1));
    let px_right = px_left.saturating_add(rect.width).min(image.width);
    let px_bottom = px_top.saturating_add(rect.height).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in 0..out_height {
        let src_start = ((px_top + y) as usize * image.width as usize + px_left as usize) * 3;
        match image.pixels.get(src_start..src_start + row_bytes) {
            Some(row) => output.extend_from_slice(row),
            None => output.resize(output.len() + row_bytes, 0),
        }
    }

    DecodedImage::new(out_width, out_height, output)
}

/// Surround the image with black borders of the given widths.
pub fn embed(image: &DecodedImage, padding: Padding) -> DecodedImage {
    if padding.is_empty() {
        return image.clone();
    }

    let out_width = image.width + padding.left + padding.right;
    let out_height = image.height + padding.top + padding.bottom;
    let mut output = vec![0u8; out_width as usize * out_height as usize * 3];

    let row_bytes = image.width as usize * 3;
    for y in 0..image.height {
        let src_start = y as usize * row_bytes;
        let dst_start =
            ((padding.top + y) as usize * out_width as usize + padding.left as usize) * 3;
        if let Some(row) = image.pixels.get(src_start..src_start + row_bytes) {
            output[dst_start..dst_start + row_bytes].copy_from_slice(row);
        }
    }

    DecodedImage::new(out_width, out_height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn value_at(image: &DecodedImage, x: u32, y: u32) -> u8 {
        image.pixels[((y * image.width + x) * 3) as usize]
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(10, 10);
        let cropped = extract_area(&img, Rect::new(0, 0, 10, 10));
        assert_eq!(cropped.width, 10);
        assert_eq!(cropped.height, 10);
        assert_eq!(cropped.pixels, img.pixels);
    }

    #[test]
    fn test_centre_crop_offsets() {
        // 320x261 intermediate cropped to 320x240, centre gravity
        let img = test_image(320, 261);
        let cropped = extract_area(&img, Rect::new(0, 10, 320, 240));
        assert_eq!((cropped.width, cropped.height), (320, 240));
        assert_eq!(value_at(&cropped, 0, 0), value_at(&img, 0, 10));
        assert_eq!(value_at(&cropped, 319, 239), value_at(&img, 319, 249));
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let cropped = extract_area(&img, Rect::new(2, 3, 4, 5));
        for y in 0..5 {
            for x in 0..4 {
                assert_eq!(value_at(&cropped, x, y), value_at(&img, x + 2, y + 3));
            }
        }
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let cropped = extract_area(&img, Rect::new(8, 8, 5, 5));
        assert_eq!((cropped.width, cropped.height), (2, 2));
    }

    #[test]
    fn test_crop_minimum_dimension() {
        let img = test_image(10, 10);
        let cropped = extract_area(&img, Rect::new(3, 3, 0, 0));
        assert_eq!((cropped.width, cropped.height), (1, 1));
    }

    #[test]
    fn test_embed_vertical_padding() {
        let img = test_image(240, 316);
        let padded = embed(
            &img,
            Padding {
                top: 2,
                right: 0,
                bottom: 2,
                left: 0,
            },
        );
        assert_eq!((padded.width, padded.height), (240, 320));
        // Borders are black
        assert!(padded.pixels[..240 * 2 * 3].iter().all(|&v| v == 0));
        assert!(padded.pixels[240 * 318 * 3..].iter().all(|&v| v == 0));
        // Content is shifted down by the top padding
        assert_eq!(value_at(&padded, 5, 2), value_at(&img, 5, 0));
        assert_eq!(value_at(&padded, 239, 317), value_at(&img, 239, 315));
    }

    #[test]
    fn test_embed_horizontal_padding() {
        let img = test_image(4, 2);
        let padded = embed(
            &img,
            Padding {
                top: 0,
                right: 1,
                bottom: 0,
                left: 2,
            },
        );
        assert_eq!((padded.width, padded.height), (7, 2));
        assert_eq!(value_at(&padded, 0, 0), 0);
        assert_eq!(value_at(&padded, 2, 1), value_at(&img, 0, 1));
        assert_eq!(value_at(&padded, 6, 1), 0);
    }

    #[test]
    fn test_embed_empty_padding_is_copy() {
        let img = test_image(5, 5);
        let padded = embed(&img, Padding::default());
        assert_eq!(padded.pixels, img.pixels);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
