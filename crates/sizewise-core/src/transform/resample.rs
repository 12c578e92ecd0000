//! Scaling a decoded buffer to the resolved intermediate size.
//!
//! The two sampling conventions differ only in how output pixels map back
//! onto the source grid:
//!
//! - **Corner**: the first and last pixels of each axis line up exactly,
//!   `src = dst * (src_len - 1) / (dst_len - 1)`.
//! - **Centre**: pixel centres line up,
//!   `src = (dst + 0.5) * src_len / dst_len - 0.5`. This is the mapping the
//!   `image` crate's filters use, so it delegates to
//!   [`image::imageops::resize`].

use image::imageops::{self, FilterType};
use tracing::trace;

use crate::decode::DecodedImage;
use crate::resolve::{SamplingConvention, Size};

/// Resample `image` to exactly `target` using the given convention.
///
/// The input may be any size, including a pre-shrunk buffer; the output is
/// always `target`. A target equal to the input size returns a copy.
pub fn resample(image: &DecodedImage, target: Size, sampling: SamplingConvention) -> DecodedImage {
    if image.width == target.width && image.height == target.height {
        return image.clone();
    }
    if image.is_empty() || target.width == 0 || target.height == 0 {
        return DecodedImage::new(
            target.width,
            target.height,
            vec![0u8; rgb_len(target)],
        );
    }

    trace!(
        "Resampling {}x{} -> {} ({:?})",
        image.width,
        image.height,
        target,
        sampling
    );

    match sampling {
        SamplingConvention::Centre => resample_centre(image, target),
        SamplingConvention::Corner => resample_corner(image, target),
    }
}

fn resample_centre(image: &DecodedImage, target: Size) -> DecodedImage {
    match image.to_rgb_image() {
        Some(rgb) => DecodedImage::from_rgb_image(imageops::resize(
            &rgb,
            target.width,
            target.height,
            FilterType::Triangle,
        )),
        // Only reachable with a malformed buffer; the corner path tolerates it.
        None => resample_corner(image, target),
    }
}

fn resample_corner(image: &DecodedImage, target: Size) -> DecodedImage {
    let x_step = corner_step(image.width, target.width);
    let y_step = corner_step(image.height, target.height);

    let mut output = Vec::with_capacity(rgb_len(target));
    for dst_y in 0..target.height {
        let src_y = dst_y as f64 * y_step;
        for dst_x in 0..target.width {
            let src_x = dst_x as f64 * x_step;
            output.extend_from_slice(&sample_bilinear(image, src_x, src_y));
        }
    }

    DecodedImage::new(target.width, target.height, output)
}

fn rgb_len(size: Size) -> usize {
    size.width as usize * size.height as usize * 3
}

/// Source distance between consecutive output pixels for corner alignment.
fn corner_step(src_len: u32, dst_len: u32) -> f64 {
    if dst_len <= 1 {
        0.0
    } else {
        (src_len.saturating_sub(1)) as f64 / (dst_len - 1) as f64
    }
}

/// Bilinear sample with coordinates clamped to the image.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let max_x = image.width.saturating_sub(1) as usize;
    let max_y = image.height.saturating_sub(1) as usize;
    let x = x.clamp(0.0, max_x as f64);
    let y = y.clamp(0.0, max_y as f64);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

#[inline]
fn get_pixel_f64(image: &DecodedImage, x: usize, y: usize) -> [f64; 3] {
    let idx = (y * image.width as usize + x) * 3;
    match image.pixels.get(idx..idx + 3) {
        Some(px) => [px[0] as f64, px[1] as f64, px[2] as f64],
        None => [0.0; 3],
    }
}
