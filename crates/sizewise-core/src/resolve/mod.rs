//! Dimension resolution for resize operations.
//!
//! This module turns a source size plus a requested target into the exact
//! geometry the resampler executes:
//! - Validation of target dimensions and flags
//! - Aspect-ratio completion when only one dimension is given
//! - Fit-mode geometry (crop, max, min, ignore aspect ratio, embed)
//! - The "without enlargement" fallback
//!
//! # Architecture
//!
//! The resolver is a pure function. It reads only its request and never
//! touches pixel data, so it is safe to call from any thread. Geometry is
//! always computed from the authoritative source dimensions; a decoder that
//! pre-shrinks on load hands the resampler a smaller buffer, but the
//! resampler still targets `resize_to` from the geometry.
//!
//! # Examples
//!
//! ```ignore
//! use sizewise_core::resolve::{resolve, FitMode, ResizeRequest, Size};
//!
//! let request = ResizeRequest::new(2464, 3248)
//!     .target(Some(320), Some(320))
//!     .fit(FitMode::Max);
//! let geometry = resolve(&request).unwrap();
//! assert_eq!(geometry.output, Size::new(243, 320));
//! ```

mod resolver;
mod types;
mod validate;

pub use resolver::resolve;
pub use types::{
    Axis, DimensionIssue, FitMode, Gravity, Padding, Rect, ResizeGeometry, ResizeRequest,
    ResolveError, SamplingConvention, Size, MAX_DIMENSION,
};
pub use validate::{
    dimension_from_arg, flag_from_arg, validate_dimension, validate_source, validate_target,
};
