//! Sizewise Core - Image resize library
//!
//! This crate resolves resize requests into exact output geometry and runs
//! that geometry against real images: decoding, shrink-on-load, resampling,
//! cropping, padding and re-encoding.

pub mod decode;
pub mod encode;
pub mod options;
pub mod pipeline;
pub mod resolve;
pub mod transform;

pub use options::{ArgValue, ResizeArgs, ResizeOptions};
pub use pipeline::{OutputInfo, Pipeline, PipelineError, MAX_PIXELS};
pub use resolve::{
    resolve, FitMode, Gravity, ResizeGeometry, ResizeRequest, ResolveError, SamplingConvention,
    Size, MAX_DIMENSION,
};
