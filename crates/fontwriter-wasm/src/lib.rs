//! Fontwriter WASM - WebAssembly bindings for the atlas encoder
//!
//! This crate provides WASM bindings to expose the fontwriter-core encoder
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for atlas data
//! - `encode` - Indexed PNG encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_indexed_png } from '@fontwriter/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const png = encode_indexed_png(rgbaBytes, 2048, 2048, undefined);
//! console.log(`Encoded ${png.byteLength} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod types;

// Re-export public types
pub use encode::{
    encode_indexed_png, encode_indexed_png_with_color, encode_indexed_png_with_config, parse_tint,
};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
