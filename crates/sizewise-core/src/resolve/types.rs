//! Core types for dimension resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exclusive upper bound for a requested target width or height (0x4000).
pub const MAX_DIMENSION: u32 = 0x4000;

/// How the source image is fitted onto the requested target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitMode {
    /// Scale to cover the box, then crop to exactly the target size.
    #[default]
    Crop,
    /// Scale to fit inside the box, preserving aspect ratio.
    Max,
    /// Scale to cover the box, preserving aspect ratio. One axis may exceed the target.
    Min,
    /// Stretch each axis independently to the exact target size.
    IgnoreAspectRatio,
    /// Scale to fit inside the box, then pad to exactly the target size.
    Embed,
}

/// Pixel-centre alignment used by the resampler.
///
/// Recorded on the geometry and forwarded unchanged; it never influences
/// the computed dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SamplingConvention {
    /// Corner pixels of source and output are aligned.
    #[default]
    Corner,
    /// Pixel centres are aligned (half-pixel offset).
    #[serde(alias = "center")]
    Centre,
}

/// Anchor for the crop window (`Crop`) or the scaled image on the canvas (`Embed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gravity {
    #[default]
    #[serde(alias = "center")]
    Centre,
    North,
    East,
    South,
    West,
}

impl Gravity {
    /// Offset of a box inside `space_x` × `space_y` pixels of slack.
    pub fn offset(self, space_x: u32, space_y: u32) -> (u32, u32) {
        match self {
            Gravity::Centre => (space_x / 2, space_y / 2),
            Gravity::North => (space_x / 2, 0),
            Gravity::East => (space_x, space_y / 2),
            Gravity::South => (space_x / 2, space_y),
            Gravity::West => (0, space_y / 2),
        }
    }
}

/// The axis a dimension error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Why a requested dimension was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionIssue {
    NotNumeric,
    Fractional,
    NotPositive,
    TooLarge,
}

impl fmt::Display for DimensionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionIssue::NotNumeric => f.write_str("expected a number"),
            DimensionIssue::Fractional => f.write_str("expected an integer"),
            DimensionIssue::NotPositive => f.write_str("must be greater than zero"),
            DimensionIssue::TooLarge => write!(f, "must be less than {}", MAX_DIMENSION),
        }
    }
}

/// Error types for dimension resolution and option validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// A target width or height is not a positive integer below [`MAX_DIMENSION`].
    #[error("Invalid {axis}: {reason}")]
    InvalidDimension { axis: Axis, reason: DimensionIssue },

    /// A flag that must be a boolean was given something else.
    #[error("Invalid option {name}: expected a boolean, got {found}")]
    InvalidOption { name: String, found: String },

    /// The decoded source reported a zero dimension.
    #[error("Invalid source dimensions: {width}x{height}")]
    InvalidSource { width: u32, height: u32 },
}

impl ResolveError {
    pub(crate) fn dimension(axis: Axis, reason: DimensionIssue) -> Self {
        ResolveError::InvalidDimension { axis, reason }
    }
}

/// Width × height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale both axes by `factor`, rounding to nearest and never below 1.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: scale_axis(self.width, factor),
            height: scale_axis(self.height, factor),
        }
    }

    /// True when either axis is larger than the matching axis of `other`.
    pub fn exceeds(self, other: Size) -> bool {
        self.width > other.width || self.height > other.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Scale one axis, rounding half away from zero, clamped to at least 1px.
pub(crate) fn scale_axis(value: u32, factor: f64) -> u32 {
    ((value as f64 * factor).round() as u32).max(1)
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Canvas border added around a scaled image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub fn is_empty(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

/// Input to the resolver: source size plus everything the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub source_width: u32,
    pub source_height: u32,
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    pub fit: FitMode,
    pub allow_enlargement: bool,
    pub sampling: SamplingConvention,
    pub gravity: Gravity,
}

impl ResizeRequest {
    /// An identity request for a source of the given size.
    pub fn new(source_width: u32, source_height: u32) -> Self {
        Self {
            source_width,
            source_height,
            target_width: None,
            target_height: None,
            fit: FitMode::default(),
            allow_enlargement: true,
            sampling: SamplingConvention::default(),
            gravity: Gravity::default(),
        }
    }

    pub fn target(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    pub fn fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    pub fn allow_enlargement(mut self, allow: bool) -> Self {
        self.allow_enlargement = allow;
        self
    }

    pub fn sampling(mut self, sampling: SamplingConvention) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }
}

/// Resolved geometry handed to the resampler.
///
/// The resampler scales the source to `resize_to`, then keeps `crop` (if any)
/// and adds `padding` (if any). The result is always `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeGeometry {
    /// Authoritative dimensions of the decoded source.
    pub source: Size,
    /// Intermediate size produced by scaling.
    pub resize_to: Size,
    /// Region of the intermediate image that is kept.
    pub crop: Option<Rect>,
    /// Border added around the intermediate image.
    pub padding: Option<Padding>,
    /// Final output dimensions.
    pub output: Size,
    /// Pass-through of the requested sampling convention.
    pub sampling: SamplingConvention,
}

impl ResizeGeometry {
    /// Geometry that leaves the source untouched.
    pub fn identity(source: Size, sampling: SamplingConvention) -> Self {
        Self {
            source,
            resize_to: source,
            crop: None,
            padding: None,
            output: source,
            sampling,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.resize_to == self.source && self.crop.is_none() && self.padding.is_none()
    }

    /// Largest power-of-two pre-shrink (1, 2, 4 or 8) a decoder may apply
    /// while still leaving at least `resize_to` pixels on each axis.
    pub fn shrink_on_load_factor(&self) -> u32 {
        let mut factor = 1;
        while factor < 8 {
            let next = factor * 2;
            if self.source.width / next < self.resize_to.width
                || self.source.height / next < self.resize_to.height
            {
                break;
            }
            factor = next;
        }
        factor
    }
}
