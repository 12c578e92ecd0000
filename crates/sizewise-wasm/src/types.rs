//! Conversions between JavaScript values and core argument types.
//!
//! JavaScript callers pass loosely-typed values (`320`, `"spoons"`, `true`,
//! `undefined`). They are mapped onto [`ArgValue`] without coercion so the
//! core validators see exactly what was passed.

use serde::Deserialize;
use sizewise_core::decode::Format;
use sizewise_core::resolve::ResolveError;
use sizewise_core::{ArgValue, FitMode, Gravity, OutputInfo, ResizeArgs};
use wasm_bindgen::prelude::*;

/// Map a JS value to an argument. `undefined` and `null` mean "not given".
pub(crate) fn arg_from_js(value: &JsValue) -> Option<ArgValue> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(flag) = value.as_bool() {
        return Some(ArgValue::Bool(flag));
    }
    if let Some(number) = value.as_f64() {
        return Some(ArgValue::Number(number));
    }
    if let Some(text) = value.as_string() {
        return Some(ArgValue::Text(text));
    }
    // Objects, arrays, symbols: keep only the type name for the error message.
    Some(ArgValue::Text(
        value.js_typeof().as_string().unwrap_or_default(),
    ))
}

/// Options object accepted by `resolveDimensions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResolveArgs {
    #[serde(default)]
    pub fit: Option<FitMode>,
    #[serde(default)]
    pub gravity: Option<Gravity>,
    #[serde(default)]
    pub without_enlargement: Option<ArgValue>,
    #[serde(flatten)]
    pub sampling: ResizeArgs,
}

/// Deserialize an optional options object. `undefined`/`null` yields the default.
pub(crate) fn options_from_js<T>(value: JsValue) -> Result<T, JsValue>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

/// `withoutEnlargement()` with no argument means `true`; otherwise the value
/// must be a boolean.
pub(crate) fn without_enlargement_flag(value: Option<&ArgValue>) -> Result<bool, ResolveError> {
    match value {
        None => Ok(true),
        Some(value) => sizewise_core::resolve::flag_from_arg("withoutEnlargement", value),
    }
}

/// Parse a gravity name such as `"north"` or `"center"`.
pub(crate) fn gravity_from_name(name: &str) -> Result<Gravity, ResolveError> {
    match name.to_ascii_lowercase().as_str() {
        "centre" | "center" => Ok(Gravity::Centre),
        "north" => Ok(Gravity::North),
        "east" => Ok(Gravity::East),
        "south" => Ok(Gravity::South),
        "west" => Ok(Gravity::West),
        _ => Err(ResolveError::InvalidOption {
            name: "gravity".to_string(),
            found: format!("{:?}", name),
        }),
    }
}

pub(crate) fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// An encoded output buffer plus its metadata.
///
/// The bytes live in WASM memory; `data()` copies them into a `Uint8Array`.
#[wasm_bindgen]
pub struct JsOutput {
    data: Vec<u8>,
    info: OutputInfo,
}

#[wasm_bindgen]
impl JsOutput {
    /// Output format name: "jpeg", "png", "webp", "tiff" or "raw"
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.info.format.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.info.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.info.height
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    /// Encoded bytes as a `Uint8Array` (copied out of WASM memory).
    pub fn data(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.data.as_slice())
    }
}

impl JsOutput {
    pub(crate) fn new(data: Vec<u8>, info: OutputInfo) -> Self {
        Self { data, info }
    }

    #[cfg(test)]
    pub(crate) fn output_format(&self) -> Format {
        self.info.format
    }

    #[cfg(test)]
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.data
    }
}
