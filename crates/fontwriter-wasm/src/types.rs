//! WASM-compatible wrapper types for atlas data.
//!
//! This module provides JavaScript-friendly types that wrap the core raster
//! types, handling the conversion between packed pixels and the interleaved
//! RGBA bytes JavaScript works with.

use fontwriter_core::PackedRaster;
use wasm_bindgen::prelude::*;

/// An RGBA atlas held in WASM memory.
///
/// Encoding with the default tint stamps the bottom-right 3x3 block white;
/// the stamp is written back into this object, so `pixels()` afterwards
/// matches what was encoded.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    name: Option<String>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Atlas width in pixels
    /// * `height` - Atlas height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
            name: None,
        }
    }

    /// Get the atlas width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the atlas height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Name reported in encoder errors and warnings
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> Option<String> {
        self.name.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsRaster {
    /// Convert to a core raster. Fails if the byte count does not match the
    /// dimensions.
    pub(crate) fn to_packed(&self) -> Result<PackedRaster, String> {
        let raster = PackedRaster::from_rgba_bytes(self.width, self.height, &self.pixels)
            .ok_or_else(|| {
                format!(
                    "Invalid pixel data: expected {} bytes (width * height * 4), got {}",
                    u128::from(self.width) * u128::from(self.height) * 4,
                    self.pixels.len()
                )
            })?;
        Ok(match &self.name {
            Some(name) => raster.with_name(name.clone()),
            None => raster,
        })
    }

    /// Copy pixels back from a core raster after encoding.
    pub(crate) fn update_from(&mut self, raster: &PackedRaster) {
        self.pixels = raster.to_rgba_bytes();
    }
}
