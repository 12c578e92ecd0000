//! Dimension resolution WASM bindings.
//!
//! Exposes the pure resolver so JavaScript can compute output geometry
//! without handing over any pixels.
//!
//! # Example
//!
//! ```typescript
//! import { resolveDimensions } from '@sizewise/wasm';
//!
//! const geometry = resolveDimensions(2725, 2225, 320, undefined);
//! console.log(`${geometry.output.width}x${geometry.output.height}`); // 320x261
//! ```

use sizewise_core::{ArgValue, ResizeGeometry, ResizeOptions, ResolveError};
use wasm_bindgen::prelude::*;

use crate::types::{arg_from_js, options_from_js, to_js_error, without_enlargement_flag, ResolveArgs};

/// Resolve output geometry for a source of `source_width` × `source_height`.
///
/// # Arguments
///
/// * `width` / `height` - Target dimensions; `undefined` leaves an axis unset
/// * `options` - Optional object: `{ fit, gravity, withoutEnlargement,
///   centreSampling, centerSampling }`
///
/// # Returns
///
/// The geometry as a plain object: `source`, `resize_to`, `crop`, `padding`,
/// `output` and `sampling`.
///
/// # Errors
///
/// Throws on an invalid dimension, a non-boolean flag, or a zero source size.
#[wasm_bindgen(js_name = resolveDimensions)]
pub fn resolve_dimensions(
    source_width: u32,
    source_height: u32,
    width: JsValue,
    height: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let args: ResolveArgs = options_from_js(options)?;
    let geometry = resolve_args(
        source_width,
        source_height,
        arg_from_js(&width).as_ref(),
        arg_from_js(&height).as_ref(),
        &args,
    )
    .map_err(to_js_error)?;

    serde_wasm_bindgen::to_value(&geometry).map_err(to_js_error)
}

pub(crate) fn resolve_args(
    source_width: u32,
    source_height: u32,
    width: Option<&ArgValue>,
    height: Option<&ArgValue>,
    args: &ResolveArgs,
) -> Result<ResizeGeometry, ResolveError> {
    let mut options = ResizeOptions::new().resize_args(width, height, Some(&args.sampling))?;
    if let Some(fit) = args.fit {
        options.fit = fit;
    }
    if let Some(gravity) = args.gravity {
        options = options.gravity(gravity);
    }
    if let Some(value) = args.without_enlargement.as_ref() {
        options = options.without_enlargement(Some(without_enlargement_flag(Some(value))?));
    }
    options.resolve(source_width, source_height)
}
