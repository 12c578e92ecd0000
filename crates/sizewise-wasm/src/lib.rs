//! Sizewise WASM - WebAssembly bindings for Sizewise
//!
//! This crate exposes the sizewise-core resize pipeline and dimension
//! resolver to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `pipeline` - Fluent resize pipeline (`SizewisePipeline`)
//! - `resize` - Pure dimension resolution (`resolveDimensions`)
//! - `types` - JS value conversion and the output wrapper
//!
//! # Usage
//!
//! ```typescript
//! import init, { SizewisePipeline } from '@sizewise/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const output = new SizewisePipeline(bytes).resize(320, undefined).toBuffer();
//! console.log(`Resized to ${output.width}x${output.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod pipeline;
mod resize;
mod types;

// Re-export public types
pub use pipeline::JsPipeline;
pub use resize::resolve_dimensions;
pub use types::JsOutput;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Largest accepted target dimension plus one (0x4000).
#[wasm_bindgen(js_name = maxDimension)]
pub fn max_dimension() -> u32 {
    sizewise_core::MAX_DIMENSION
}
