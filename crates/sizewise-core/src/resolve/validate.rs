//! Validation of requested dimensions and flags.
//!
//! Everything here runs before any ratio math. Typed values (`u32`, `bool`)
//! come from Rust callers; [`ArgValue`]s come from dynamically-typed callers
//! such as the JavaScript bindings.

use super::types::{Axis, DimensionIssue, ResolveError, Size, MAX_DIMENSION};
use crate::options::ArgValue;

/// Check a typed target dimension.
pub fn validate_dimension(axis: Axis, value: u32) -> Result<u32, ResolveError> {
    if value == 0 {
        return Err(ResolveError::dimension(axis, DimensionIssue::NotPositive));
    }
    if value >= MAX_DIMENSION {
        return Err(ResolveError::dimension(axis, DimensionIssue::TooLarge));
    }
    Ok(value)
}

/// Check an optional typed target dimension. `None` stays unspecified.
pub fn validate_target(axis: Axis, value: Option<u32>) -> Result<Option<u32>, ResolveError> {
    value.map(|v| validate_dimension(axis, v)).transpose()
}

/// Convert a dynamic argument into a target dimension.
///
/// Rejects non-numbers, non-finite and fractional numbers, values `<= 0`
/// and values `>= 0x4000`, in that order.
pub fn dimension_from_arg(axis: Axis, value: Option<&ArgValue>) -> Result<Option<u32>, ResolveError> {
    let number = match value {
        None => return Ok(None),
        Some(ArgValue::Number(n)) => *n,
        Some(_) => return Err(ResolveError::dimension(axis, DimensionIssue::NotNumeric)),
    };

    if !number.is_finite() {
        return Err(ResolveError::dimension(axis, DimensionIssue::NotNumeric));
    }
    if number.fract() != 0.0 {
        return Err(ResolveError::dimension(axis, DimensionIssue::Fractional));
    }
    if number <= 0.0 {
        return Err(ResolveError::dimension(axis, DimensionIssue::NotPositive));
    }
    if number >= MAX_DIMENSION as f64 {
        return Err(ResolveError::dimension(axis, DimensionIssue::TooLarge));
    }
    Ok(Some(number as u32))
}

/// Convert a dynamic argument into a boolean flag named `name`.
pub fn flag_from_arg(name: &str, value: &ArgValue) -> Result<bool, ResolveError> {
    match value {
        ArgValue::Bool(flag) => Ok(*flag),
        other => Err(ResolveError::InvalidOption {
            name: name.to_string(),
            found: other.to_string(),
        }),
    }
}

/// Check the decoded source dimensions.
pub fn validate_source(width: u32, height: u32) -> Result<Size, ResolveError> {
    if width == 0 || height == 0 {
        return Err(ResolveError::InvalidSource { width, height });
    }
    Ok(Size::new(width, height))
}
