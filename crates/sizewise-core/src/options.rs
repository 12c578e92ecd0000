//! Fluent resize configuration.
//!
//! [`ResizeOptions`] collects what a caller asks for (target size, fit mode,
//! enlargement policy, sampling convention) and validates it as it is set,
//! so a bad value is reported at configuration time rather than after
//! decoding. Dynamically-typed callers pass [`ArgValue`]s and a
//! [`ResizeArgs`] options object instead of typed values.
//!
//! # Example
//!
//! ```ignore
//! use sizewise_core::options::ResizeOptions;
//!
//! let options = ResizeOptions::new()
//!     .resize(Some(320), Some(320))?
//!     .max()
//!     .without_enlargement(None);
//! let geometry = options.resolve(2725, 2225)?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolve::{
    self, dimension_from_arg, flag_from_arg, validate_target, Axis, FitMode, Gravity,
    ResizeGeometry, ResizeRequest, ResolveError, SamplingConvention,
};

/// A dynamically-typed argument as received from a scripting boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Number(n) => write!(f, "{}", n),
            ArgValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

/// The options object accepted alongside `resize(width, height, options)`.
///
/// `centreSampling` and `centerSampling` are synonyms; when both are present
/// the later one (`centerSampling`) wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centre_sampling: Option<ArgValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_sampling: Option<ArgValue>,
}

impl ResizeArgs {
    /// Resolve the sampling synonyms to one convention, if either was given.
    pub fn sampling(&self) -> Result<Option<SamplingConvention>, ResolveError> {
        let mut sampling = None;
        for (name, value) in [
            ("centreSampling", &self.centre_sampling),
            ("centerSampling", &self.center_sampling),
        ] {
            if let Some(value) = value {
                sampling = Some(if flag_from_arg(name, value)? {
                    SamplingConvention::Centre
                } else {
                    SamplingConvention::Corner
                });
            }
        }
        Ok(sampling)
    }
}

/// Resize configuration for one image operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: FitMode,
    pub allow_enlargement: bool,
    pub sampling: SamplingConvention,
    pub gravity: Gravity,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            fit: FitMode::default(),
            allow_enlargement: true,
            sampling: SamplingConvention::default(),
            gravity: Gravity::default(),
        }
    }
}

impl ResizeOptions {
    /// Identity configuration: no target, crop fit, enlargement allowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target size. `None` leaves that axis unspecified.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidDimension` for zero or values `>= 0x4000`.
    pub fn resize(mut self, width: Option<u32>, height: Option<u32>) -> Result<Self, ResolveError> {
        self.width = validate_target(Axis::Width, width)?;
        self.height = validate_target(Axis::Height, height)?;
        Ok(self)
    }

    /// Set the target size and options from dynamically-typed arguments.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidDimension` for non-numeric, fractional,
    /// non-positive or too-large dimensions, and `ResolveError::InvalidOption`
    /// for a non-boolean sampling flag.
    pub fn resize_args(
        mut self,
        width: Option<&ArgValue>,
        height: Option<&ArgValue>,
        args: Option<&ResizeArgs>,
    ) -> Result<Self, ResolveError> {
        self.width = dimension_from_arg(Axis::Width, width)?;
        self.height = dimension_from_arg(Axis::Height, height)?;
        if let Some(sampling) = args.map(ResizeArgs::sampling).transpose()?.flatten() {
            self.sampling = sampling;
        }
        Ok(self)
    }

    pub fn crop(mut self) -> Self {
        self.fit = FitMode::Crop;
        self
    }

    pub fn max(mut self) -> Self {
        self.fit = FitMode::Max;
        self
    }

    pub fn min(mut self) -> Self {
        self.fit = FitMode::Min;
        self
    }

    pub fn ignore_aspect_ratio(mut self) -> Self {
        self.fit = FitMode::IgnoreAspectRatio;
        self
    }

    pub fn embed(mut self) -> Self {
        self.fit = FitMode::Embed;
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Forbid (or re-allow) output larger than the source. `None` means `true`.
    pub fn without_enlargement(mut self, without: Option<bool>) -> Self {
        self.allow_enlargement = !without.unwrap_or(true);
        self
    }

    pub fn sampling(mut self, sampling: SamplingConvention) -> Self {
        self.sampling = sampling;
        self
    }

    /// Build the resolver request for a decoded source of the given size.
    pub fn request(&self, source_width: u32, source_height: u32) -> ResizeRequest {
        ResizeRequest::new(source_width, source_height)
            .target(self.width, self.height)
            .fit(self.fit)
            .allow_enlargement(self.allow_enlargement)
            .sampling(self.sampling)
            .gravity(self.gravity)
    }

    /// Resolve these options against a source size.
    pub fn resolve(
        &self,
        source_width: u32,
        source_height: u32,
    ) -> Result<ResizeGeometry, ResolveError> {
        resolve::resolve(&self.request(source_width, source_height))
    }
}
