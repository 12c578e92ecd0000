//! End-to-end resize pipeline: decode, resolve, resample, encode.
//!
//! A [`Pipeline`] owns the input bytes and a [`ResizeOptions`]. Nothing is
//! decoded until [`Pipeline::to_buffer`] runs; configuration errors surface
//! from the builder methods themselves.
//!
//! # Example
//!
//! ```ignore
//! use sizewise_core::pipeline::Pipeline;
//!
//! let (bytes, info) = Pipeline::new(input)
//!     .resize(Some(320), None)?
//!     .webp()
//!     .to_buffer()?;
//! assert_eq!((info.width, info.height), (320, 261));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::{self, shrink_on_load, DecodeError, DecodedImage, Format, ImageMetadata};
use crate::encode::{self, EncodeError, EncodeOptions, PixelLayout};
use crate::options::{ArgValue, ResizeArgs, ResizeOptions};
use crate::resolve::{Gravity, ResizeGeometry, ResolveError, SamplingConvention, Size};
use crate::transform::apply_geometry;

/// Largest pixel count any intermediate or output buffer may hold.
pub const MAX_PIXELS: u64 = 100_000_000;

/// Any failure between input bytes and output bytes.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The resolved geometry needs a buffer larger than [`MAX_PIXELS`]
    #[error("Image too large: {size} exceeds the {limit} pixel limit")]
    TooLarge { size: Size, limit: u64 },
}

/// Metadata describing the produced buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputInfo {
    pub format: Format,
    pub width: u32,
    pub height: u32,
}

/// Fluent resize job over one encoded input image.
#[derive(Debug, Clone)]
pub struct Pipeline {
    input: Vec<u8>,
    options: ResizeOptions,
    output_format: Option<Format>,
    greyscale: bool,
    encode: EncodeOptions,
}

impl Pipeline {
    /// Start a job for an encoded image (JPEG, PNG, WebP or TIFF).
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into(),
            options: ResizeOptions::default(),
            output_format: None,
            greyscale: false,
            encode: EncodeOptions::default(),
        }
    }

    /// Read the input's natural dimensions and format without decoding pixels.
    pub fn metadata(&self) -> Result<ImageMetadata, PipelineError> {
        Ok(decode::probe(&self.input)?)
    }

    /// Set the target size. See [`ResizeOptions::resize`].
    pub fn resize(mut self, width: Option<u32>, height: Option<u32>) -> Result<Self, ResolveError> {
        self.options = self.options.resize(width, height)?;
        Ok(self)
    }

    /// Set the target size from dynamically-typed arguments.
    /// See [`ResizeOptions::resize_args`].
    pub fn resize_args(
        mut self,
        width: Option<&ArgValue>,
        height: Option<&ArgValue>,
        args: Option<&ResizeArgs>,
    ) -> Result<Self, ResolveError> {
        self.options = self.options.resize_args(width, height, args)?;
        Ok(self)
    }

    pub fn crop(mut self) -> Self {
        self.options = self.options.crop();
        self
    }

    pub fn max(mut self) -> Self {
        self.options = self.options.max();
        self
    }

    pub fn min(mut self) -> Self {
        self.options = self.options.min();
        self
    }

    pub fn ignore_aspect_ratio(mut self) -> Self {
        self.options = self.options.ignore_aspect_ratio();
        self
    }

    pub fn embed(mut self) -> Self {
        self.options = self.options.embed();
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.options = self.options.gravity(gravity);
        self
    }

    pub fn without_enlargement(mut self, without: Option<bool>) -> Self {
        self.options = self.options.without_enlargement(without);
        self
    }

    pub fn sampling(mut self, sampling: SamplingConvention) -> Self {
        self.options = self.options.sampling(sampling);
        self
    }

    pub fn jpeg(self) -> Self {
        self.format(Format::Jpeg)
    }

    pub fn png(self) -> Self {
        self.format(Format::Png)
    }

    pub fn webp(self) -> Self {
        self.format(Format::WebP)
    }

    pub fn tiff(self) -> Self {
        self.format(Format::Tiff)
    }

    /// Emit uncompressed pixel bytes with no header.
    pub fn raw(self) -> Self {
        self.format(Format::Raw)
    }

    /// Set the output format explicitly. Unset means "same as input".
    pub fn format(mut self, format: Format) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Reduce the output to a single luma channel.
    pub fn greyscale(mut self) -> Self {
        self.greyscale = true;
        self
    }

    /// JPEG quality (1-100).
    pub fn quality(mut self, quality: u8) -> Self {
        self.encode.quality = quality;
        self
    }

    /// Run the job.
    ///
    /// # Errors
    ///
    /// - `PipelineError::Decode` when the input cannot be decoded
    /// - `PipelineError::Resolve` when the decoded source is unusable
    /// - `PipelineError::Encode` when the output cannot be encoded
    pub fn to_buffer(&self) -> Result<(Vec<u8>, OutputInfo), PipelineError> {
        let (source, input_format) = decode::decode(&self.input)?;

        // Geometry always comes from the fully decoded source dimensions.
        let geometry = self.options.resolve(source.width, source.height)?;
        debug!(
            "Resolved {} -> {} (resize to {}, {:?})",
            geometry.source, geometry.output, geometry.resize_to, self.options.fit
        );
        check_pixel_limit(&geometry)?;

        let resized = if geometry.is_identity() {
            source
        } else {
            let factor = if input_format.supports_shrink_on_load() {
                geometry.shrink_on_load_factor()
            } else {
                1
            };
            if factor > 1 {
                debug!("Shrink-on-load by {}", factor);
                apply_geometry(&shrink_on_load(&source, factor)?, &geometry)
            } else {
                apply_geometry(&source, &geometry)
            }
        };

        let format = self.output_format.unwrap_or(input_format);
        let bytes = self.encode_image(&resized, format)?;
        debug!(
            "Encoded {} output: {}x{}, {} bytes",
            format,
            resized.width,
            resized.height,
            bytes.len()
        );

        Ok((
            bytes,
            OutputInfo {
                format,
                width: resized.width,
                height: resized.height,
            },
        ))
    }

    fn encode_image(&self, image: &DecodedImage, format: Format) -> Result<Vec<u8>, EncodeError> {
        let quality = self.encode.quality;
        if self.greyscale {
            let luma = image.to_luma();
            encode::encode(&luma, image.width, image.height, PixelLayout::Luma, format, quality)
        } else {
            encode::encode(
                &image.pixels,
                image.width,
                image.height,
                PixelLayout::Rgb,
                format,
                quality,
            )
        }
    }
}

/// Reject geometry whose intermediate or output buffer would exceed [`MAX_PIXELS`].
fn check_pixel_limit(geometry: &ResizeGeometry) -> Result<(), PipelineError> {
    for size in [geometry.resize_to, geometry.output] {
        let pixels = u64::from(size.width) * u64::from(size.height);
        if pixels > MAX_PIXELS {
            return Err(PipelineError::TooLarge {
                size,
                limit: MAX_PIXELS,
            });
        }
    }
    Ok(())
}
