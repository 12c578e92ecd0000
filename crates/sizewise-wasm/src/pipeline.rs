//! Fluent resize pipeline WASM bindings.
//!
//! Each configuration method consumes the pipeline and returns a new one,
//! so calls chain the same way they do in Rust.
//!
//! # Example
//!
//! ```typescript
//! import { SizewisePipeline } from '@sizewise/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const output = new SizewisePipeline(bytes)
//!   .resize(320, 240, { centreSampling: true })
//!   .webp()
//!   .toBuffer();
//! console.log(`${output.format} ${output.width}x${output.height}`);
//! ```

use sizewise_core::{Pipeline, ResizeArgs};
use wasm_bindgen::prelude::*;

use crate::types::{
    arg_from_js, gravity_from_name, options_from_js, to_js_error, without_enlargement_flag,
    JsOutput,
};

/// A resize job over one encoded image.
#[wasm_bindgen(js_name = SizewisePipeline)]
pub struct JsPipeline {
    inner: Pipeline,
}

#[wasm_bindgen(js_class = SizewisePipeline)]
impl JsPipeline {
    /// Start a job for JPEG, PNG, WebP or TIFF bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: Vec<u8>) -> JsPipeline {
        JsPipeline {
            inner: Pipeline::new(bytes),
        }
    }

    /// Set the target size.
    ///
    /// Either dimension may be `undefined`. `options` accepts
    /// `centreSampling`/`centerSampling` booleans.
    ///
    /// # Errors
    ///
    /// Throws for non-numeric, fractional, non-positive or too-large
    /// dimensions and for non-boolean sampling flags.
    pub fn resize(
        self,
        width: JsValue,
        height: JsValue,
        options: JsValue,
    ) -> Result<JsPipeline, JsValue> {
        let args: ResizeArgs = options_from_js(options)?;
        let inner = self
            .inner
            .resize_args(
                arg_from_js(&width).as_ref(),
                arg_from_js(&height).as_ref(),
                Some(&args),
            )
            .map_err(to_js_error)?;
        Ok(JsPipeline { inner })
    }

    pub fn crop(self) -> JsPipeline {
        self.map(|p| p.crop())
    }

    pub fn max(self) -> JsPipeline {
        self.map(|p| p.max())
    }

    pub fn min(self) -> JsPipeline {
        self.map(|p| p.min())
    }

    #[wasm_bindgen(js_name = ignoreAspectRatio)]
    pub fn ignore_aspect_ratio(self) -> JsPipeline {
        self.map(|p| p.ignore_aspect_ratio())
    }

    pub fn embed(self) -> JsPipeline {
        self.map(|p| p.embed())
    }

    /// Anchor for crop or embed: "centre", "north", "east", "south", "west".
    pub fn gravity(self, name: &str) -> Result<JsPipeline, JsValue> {
        let gravity = gravity_from_name(name).map_err(to_js_error)?;
        Ok(self.map(|p| p.gravity(gravity)))
    }

    /// Never enlarge past the source. Calling with no argument means `true`.
    #[wasm_bindgen(js_name = withoutEnlargement)]
    pub fn without_enlargement(self, value: JsValue) -> Result<JsPipeline, JsValue> {
        let flag = without_enlargement_flag(arg_from_js(&value).as_ref()).map_err(to_js_error)?;
        Ok(self.map(|p| p.without_enlargement(Some(flag))))
    }

    pub fn jpeg(self) -> JsPipeline {
        self.map(|p| p.jpeg())
    }

    pub fn png(self) -> JsPipeline {
        self.map(|p| p.png())
    }

    pub fn webp(self) -> JsPipeline {
        self.map(|p| p.webp())
    }

    pub fn tiff(self) -> JsPipeline {
        self.map(|p| p.tiff())
    }

    pub fn raw(self) -> JsPipeline {
        self.map(|p| p.raw())
    }

    pub fn greyscale(self) -> JsPipeline {
        self.map(|p| p.greyscale())
    }

    /// JPEG quality, 1-100.
    pub fn quality(self, quality: u8) -> JsPipeline {
        self.map(|p| p.quality(quality))
    }

    /// Natural `{ width, height, format }` of the input.
    pub fn metadata(&self) -> Result<JsValue, JsValue> {
        let meta = self.inner.metadata().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&meta).map_err(to_js_error)
    }

    /// Run the job and return the encoded output.
    #[wasm_bindgen(js_name = toBuffer)]
    pub fn to_buffer(&self) -> Result<JsOutput, JsValue> {
        let (data, info) = self.inner.to_buffer().map_err(to_js_error)?;
        Ok(JsOutput::new(data, info))
    }
}

impl JsPipeline {
    fn map(self, f: impl FnOnce(Pipeline) -> Pipeline) -> JsPipeline {
        JsPipeline { inner: f(self.inner) }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_resize_and_encode() {
        let output = JsPipeline::new(super::tests::jpeg(545, 445))
            .resize(JsValue::from_f64(320.0), JsValue::UNDEFINED, JsValue::UNDEFINED)
            .unwrap()
            .webp()
            .to_buffer()
            .unwrap();
        assert_eq!(output.format(), "webp");
        assert_eq!((output.width(), output.height()), (320, 261));
    }

    #[wasm_bindgen_test]
    fn test_without_enlargement_undefined_means_true() {
        let output = JsPipeline::new(super::tests::jpeg(100, 80))
            .resize(JsValue::from_f64(400.0), JsValue::UNDEFINED, JsValue::UNDEFINED)
            .unwrap()
            .without_enlargement(JsValue::UNDEFINED)
            .unwrap()
            .to_buffer()
            .unwrap();
        assert_eq!((output.width(), output.height()), (100, 80));
    }

    #[wasm_bindgen_test]
    fn test_without_enlargement_rejects_string() {
        let result = JsPipeline::new(super::tests::jpeg(10, 10))
            .without_enlargement(JsValue::from_str("yes"));
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_rejects_too_large() {
        let result = JsPipeline::new(super::tests::jpeg(10, 10)).resize(
            JsValue::from_f64(16384.0),
            JsValue::UNDEFINED,
            JsValue::UNDEFINED,
        );
        assert!(result.is_err());
    }
}
