//! The dimension resolver.
//!
//! Pipeline: validation → aspect-ratio completion → fit-mode geometry →
//! enlargement clamp. All ratio math is `f64`, rounded half away from zero.

use tracing::{debug, trace};

use super::types::{
    Axis, FitMode, Padding, Rect, ResizeGeometry, ResizeRequest, ResolveError, Size,
};
use super::validate::{validate_source, validate_target};

/// Resolve a request into output dimensions plus crop/pad geometry.
///
/// # Errors
///
/// Returns `ResolveError::InvalidDimension` for a zero or too-large target and
/// `ResolveError::InvalidSource` for a zero-sized source. Validation always
/// runs before any scaling math.
///
/// # Example
///
/// ```ignore
/// use sizewise_core::resolve::{resolve, ResizeRequest, Size};
///
/// let geometry = resolve(&ResizeRequest::new(2725, 2225).target(Some(320), None))?;
/// assert_eq!(geometry.output, Size::new(320, 261));
/// ```
pub fn resolve(request: &ResizeRequest) -> Result<ResizeGeometry, ResolveError> {
    let source = validate_source(request.source_width, request.source_height)?;
    let target_width = validate_target(Axis::Width, request.target_width)?;
    let target_height = validate_target(Axis::Height, request.target_height)?;

    let (target, fit) = match (target_width, target_height) {
        (None, None) => {
            trace!("No target dimensions, identity transform for {}", source);
            return Ok(ResizeGeometry::identity(source, request.sampling));
        }
        (Some(width), Some(height)) => (Size::new(width, height), request.fit),
        (Some(width), None) => match request.fit {
            FitMode::IgnoreAspectRatio => (Size::new(width, source.height), request.fit),
            _ => (
                Size::new(width, proportional(width, source.height, source.width)),
                FitMode::Crop,
            ),
        },
        (None, Some(height)) => match request.fit {
            FitMode::IgnoreAspectRatio => (Size::new(source.width, height), request.fit),
            _ => (
                Size::new(proportional(height, source.width, source.height), height),
                FitMode::Crop,
            ),
        },
    };

    if !request.allow_enlargement && would_enlarge(source, target, fit) {
        debug!(
            "Enlargement disabled, keeping source {} instead of {} ({:?})",
            source, target, fit
        );
        return Ok(ResizeGeometry::identity(source, request.sampling));
    }

    let geometry = match fit {
        FitMode::Crop => cover_and_crop(source, target, request),
        FitMode::Max => scale_only(source, fit_within_scale(source, target), request),
        FitMode::Min => scale_only(source, cover_scale(source, target), request),
        FitMode::IgnoreAspectRatio => ResizeGeometry {
            source,
            resize_to: target,
            crop: None,
            padding: None,
            output: target,
            sampling: request.sampling,
        },
        FitMode::Embed => fit_and_pad(source, target, request),
    };

    debug!(
        "Resolved {} -> {} ({:?}, resize_to {}, crop {:?}, padding {:?})",
        source, geometry.output, fit, geometry.resize_to, geometry.crop, geometry.padding
    );
    Ok(geometry)
}

/// `round(specified * source_other / source_specified)`, at least 1.
fn proportional(specified: u32, source_other: u32, source_specified: u32) -> u32 {
    ((specified as f64 * source_other as f64 / source_specified as f64).round() as u32).max(1)
}

/// Scale that makes the source cover the whole target box.
fn cover_scale(source: Size, target: Size) -> f64 {
    let x = target.width as f64 / source.width as f64;
    let y = target.height as f64 / source.height as f64;
    x.max(y)
}

/// Scale that makes the source fit entirely inside the target box.
fn fit_within_scale(source: Size, target: Size) -> f64 {
    let x = target.width as f64 / source.width as f64;
    let y = target.height as f64 / source.height as f64;
    x.min(y)
}

/// Whether the fitted request would make the output larger than the source.
fn would_enlarge(source: Size, target: Size, fit: FitMode) -> bool {
    match fit {
        FitMode::Crop | FitMode::IgnoreAspectRatio | FitMode::Embed => target.exceeds(source),
        FitMode::Max => fit_within_scale(source, target) > 1.0,
        FitMode::Min => cover_scale(source, target) > 1.0,
    }
}

fn scale_only(source: Size, scale: f64, request: &ResizeRequest) -> ResizeGeometry {
    let scaled = source.scaled(scale);
    ResizeGeometry {
        source,
        resize_to: scaled,
        crop: None,
        padding: None,
        output: scaled,
        sampling: request.sampling,
    }
}

fn cover_and_crop(source: Size, target: Size, request: &ResizeRequest) -> ResizeGeometry {
    let scaled = source.scaled(cover_scale(source, target));
    // The crop window must fit; rounding may land one pixel short.
    let resize_to = Size::new(
        scaled.width.max(target.width),
        scaled.height.max(target.height),
    );

    let crop = if resize_to == target {
        None
    } else {
        let (x, y) = request.gravity.offset(
            resize_to.width - target.width,
            resize_to.height - target.height,
        );
        Some(Rect::new(x, y, target.width, target.height))
    };

    ResizeGeometry {
        source,
        resize_to,
        crop,
        padding: None,
        output: target,
        sampling: request.sampling,
    }
}

fn fit_and_pad(source: Size, target: Size, request: &ResizeRequest) -> ResizeGeometry {
    let scaled = source.scaled(fit_within_scale(source, target));
    let resize_to = Size::new(
        scaled.width.min(target.width),
        scaled.height.min(target.height),
    );

    let space_x = target.width - resize_to.width;
    let space_y = target.height - resize_to.height;
    let (left, top) = request.gravity.offset(space_x, space_y);
    let padding = Padding {
        top,
        right: space_x - left,
        bottom: space_y - top,
        left,
    };

    ResizeGeometry {
        source,
        resize_to,
        crop: None,
        padding: (!padding.is_empty()).then_some(padding),
        output: target,
        sampling: request.sampling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::types::{DimensionIssue, Gravity, SamplingConvention};

    // Natural size of the landscape JPEG fixture.
    const JPG: (u32, u32) = (2725, 2225);
    // Natural size of the portrait TIFF fixture.
    const TIFF: (u32, u32) = (2464, 3248);

    fn request(source: (u32, u32), width: Option<u32>, height: Option<u32>) -> ResizeRequest {
        ResizeRequest::new(source.0, source.1).target(width, height)
    }

    fn output(request: ResizeRequest) -> (u32, u32) {
        let geometry = resolve(&request).unwrap();
        (geometry.output.width, geometry.output.height)
    }

    #[test]
    fn test_exact_crop() {
        let geometry = resolve(&request(JPG, Some(320), Some(240))).unwrap();
        assert_eq!(geometry.output, Size::new(320, 240));
        // Cover scale is 320 / 2725, height overflows and is cropped
        assert_eq!(geometry.resize_to, Size::new(320, 261));
        assert_eq!(geometry.crop, Some(Rect::new(0, 10, 320, 240)));
    }

    #[test]
    fn test_crop_window_is_centred() {
        let geometry = resolve(&request(JPG, Some(320), Some(320))).unwrap();
        assert_eq!(geometry.output, Size::new(320, 320));
        assert_eq!(geometry.resize_to, Size::new(392, 320));
        assert_eq!(geometry.crop, Some(Rect::new(36, 0, 320, 320)));
    }

    #[test]
    fn test_crop_window_follows_gravity() {
        let req = request(JPG, Some(320), Some(320)).gravity(Gravity::East);
        let geometry = resolve(&req).unwrap();
        assert_eq!(geometry.crop, Some(Rect::new(72, 0, 320, 320)));

        let req = request(JPG, Some(320), Some(320)).gravity(Gravity::West);
        let geometry = resolve(&req).unwrap();
        assert_eq!(geometry.crop, Some(Rect::new(0, 0, 320, 320)));
    }

    #[test]
    fn test_fixed_width() {
        assert_eq!(output(request(JPG, Some(320), None)), (320, 261));
    }

    #[test]
    fn test_fixed_height() {
        assert_eq!(output(request(JPG, None, Some(320))), (392, 320));
    }

    #[test]
    fn test_identity_transform() {
        let geometry = resolve(&request(JPG, None, None)).unwrap();
        assert_eq!(geometry.output, Size::new(2725, 2225));
        assert!(geometry.is_identity());
    }

    #[test]
    fn test_identity_transform_ignoring_aspect_ratio() {
        let req = request(JPG, None, None).fit(FitMode::IgnoreAspectRatio);
        assert_eq!(output(req), (2725, 2225));
    }

    #[test]
    fn test_upscale() {
        assert_eq!(output(request(JPG, Some(3000), None)), (3000, 2450));
    }

    #[test]
    fn test_invalid_width_too_large() {
        let err = resolve(&request(JPG, Some(0x4000), Some(240))).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidDimension {
                axis: Axis::Width,
                reason: DimensionIssue::TooLarge
            }
        );
    }

    #[test]
    fn test_invalid_height_too_large() {
        let err = resolve(&request(JPG, Some(320), Some(0x4000))).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidDimension {
                axis: Axis::Height,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(resolve(&request(JPG, Some(0), Some(240))).is_err());
    }

    #[test]
    fn test_zero_source_rejected() {
        let err = resolve(&request((0, 100), Some(10), None)).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSource { .. }));
    }

    #[test]
    fn test_tiff_crop_rounding() {
        let geometry = resolve(&request(TIFF, Some(240), Some(320))).unwrap();
        assert_eq!(geometry.output, Size::new(240, 320));
        assert_eq!(geometry.resize_to, Size::new(243, 320));
        assert_eq!(geometry.crop, Some(Rect::new(1, 0, 240, 320)));
    }

    #[test]
    fn test_tiff_embed_rounding() {
        let req = request(TIFF, Some(240), Some(320)).fit(FitMode::Embed);
        let geometry = resolve(&req).unwrap();
        assert_eq!(geometry.output, Size::new(240, 320));
        assert_eq!(geometry.resize_to, Size::new(240, 316));
        assert_eq!(
            geometry.padding,
            Some(Padding {
                top: 2,
                right: 0,
                bottom: 2,
                left: 0
            })
        );
    }

    #[test]
    fn test_max_portrait() {
        let req = request(TIFF, Some(320), Some(320)).fit(FitMode::Max);
        assert_eq!(output(req), (243, 320));
    }

    #[test]
    fn test_min_portrait() {
        let req = request(TIFF, Some(320), Some(320)).fit(FitMode::Min);
        assert_eq!(output(req), (320, 422));
    }

    #[test]
    fn test_max_landscape() {
        let req = request(JPG, Some(320), Some(320)).fit(FitMode::Max);
        assert_eq!(output(req), (320, 261));
    }

    #[test]
    fn test_min_landscape() {
        let req = request(JPG, Some(320), Some(320)).fit(FitMode::Min);
        assert_eq!(output(req), (392, 320));
    }

    // Single-dimension max/min intentionally behave exactly like crop.
    #[test]
    fn test_single_dimension_max_defaults_to_crop() {
        let max = resolve(&request(JPG, Some(320), None).fit(FitMode::Max)).unwrap();
        let crop = resolve(&request(JPG, Some(320), None)).unwrap();
        assert_eq!(max, crop);
        assert_eq!(max.output, Size::new(320, 261));
    }

    #[test]
    fn test_single_dimension_min_defaults_to_crop() {
        let min = resolve(&request(JPG, Some(320), None).fit(FitMode::Min)).unwrap();
        let crop = resolve(&request(JPG, Some(320), None)).unwrap();
        assert_eq!(min, crop);
    }

    #[test]
    fn test_without_enlargement_width() {
        let req = request(JPG, Some(2800), None).allow_enlargement(false);
        let geometry = resolve(&req).unwrap();
        assert_eq!(geometry.output, Size::new(2725, 2225));
        assert!(geometry.is_identity());
    }

    #[test]
    fn test_without_enlargement_height() {
        let req = request(JPG, None, Some(2300)).allow_enlargement(false);
        assert_eq!(output(req), (2725, 2225));
    }

    #[test]
    fn test_with_enlargement() {
        let req = request(JPG, Some(2800), None).allow_enlargement(true);
        assert_eq!(output(req), (2800, 2286));
    }

    #[test]
    fn test_without_enlargement_one_axis_falls_back_entirely() {
        // Only the width would grow, the whole request still keeps the source size
        let req = request(JPG, Some(3000), Some(100)).allow_enlargement(false);
        assert_eq!(output(req), (2725, 2225));
    }

    #[test]
    fn test_without_enlargement_allows_downscale() {
        let req = request(JPG, Some(320), Some(240)).allow_enlargement(false);
        assert_eq!(output(req), (320, 240));
    }

    #[test]
    fn test_without_enlargement_max_uses_scale() {
        // Box is taller than the source but the fit-within scale is < 1
        let req = request(JPG, Some(320), Some(5000))
            .fit(FitMode::Max)
            .allow_enlargement(false);
        assert_eq!(output(req), (320, 261));

        let req = request(JPG, Some(3000), Some(3000))
            .fit(FitMode::Max)
            .allow_enlargement(false);
        assert_eq!(output(req), (2725, 2225));
    }

    #[test]
    fn test_without_enlargement_min_uses_scale() {
        let req = request(JPG, Some(320), Some(2300))
            .fit(FitMode::Min)
            .allow_enlargement(false);
        assert_eq!(output(req), (2725, 2225));
    }

    #[test]
    fn test_ignore_aspect_ratio_both() {
        let fit = FitMode::IgnoreAspectRatio;
        assert_eq!(output(request(JPG, Some(320), Some(320)).fit(fit)), (320, 320));
        assert_eq!(output(request(JPG, Some(3000), Some(3000)).fit(fit)), (3000, 3000));
        assert_eq!(output(request(JPG, Some(320), Some(3000)).fit(fit)), (320, 3000));
        assert_eq!(output(request(JPG, Some(3000), Some(320)).fit(fit)), (3000, 320));
    }

    #[test]
    fn test_ignore_aspect_ratio_single_axis_keeps_other() {
        let fit = FitMode::IgnoreAspectRatio;
        assert_eq!(output(request(JPG, Some(320), None).fit(fit)), (320, 2225));
        assert_eq!(output(request(JPG, None, Some(320)).fit(fit)), (2725, 320));
        assert_eq!(output(request(JPG, Some(3000), None).fit(fit)), (3000, 2225));
        assert_eq!(output(request(JPG, None, Some(3000)).fit(fit)), (2725, 3000));
    }

    #[test]
    fn test_reencoded_crop_recalculation() {
        let first = resolve(&request(JPG, Some(1080), Some(607))).unwrap();
        assert_eq!(first.output, Size::new(1080, 607));

        let second = resolve(&request((1080, 607), Some(233), Some(131))).unwrap();
        assert_eq!(second.output, Size::new(233, 131));
        assert_eq!(second.shrink_on_load_factor(), 4);
    }

    #[test]
    fn test_sampling_is_forwarded() {
        let req = request(JPG, Some(32), Some(24)).sampling(SamplingConvention::Centre);
        let centre = resolve(&req).unwrap();
        let corner = resolve(&req.sampling(SamplingConvention::Corner)).unwrap();

        assert_eq!(centre.sampling, SamplingConvention::Centre);
        assert_eq!(corner.sampling, SamplingConvention::Corner);
        assert_eq!(centre.output, corner.output);
        assert_eq!(centre.resize_to, corner.resize_to);
    }

    #[test]
    fn test_proportional_never_zero() {
        assert_eq!(output(request((10000, 10), Some(100), None)), (100, 1));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
