//! Atlas encoding WASM bindings.
//!
//! This module exposes the fontwriter-core indexed encoder to JavaScript.
//!
//! # Functions
//!
//! - [`encode_indexed_png`] - Encode raw RGBA bytes to an indexed PNG
//! - [`encode_indexed_png_with_color`] - Same, with the tint given as a packed
//!   RGBA8888 value (256 selects the white palette)
//! - [`encode_indexed_png_with_config`] - Encode a `JsRaster`, writing the
//!   marker stamp back into it
//! - [`parse_tint`] - Parse a hex tint to a packed RGBA value
//!
//! # Example
//!
//! ```typescript
//! import { JsRaster, encode_indexed_png_with_config } from '@fontwriter/wasm';
//!
//! const atlas = new JsRaster(width, height, rgbaBytes);
//! atlas.name = 'Gentium-sdf.png';
//! const png = encode_indexed_png_with_config(atlas, undefined, { strict_pixels: false });
//! ```

use crate::types::JsRaster;
use fontwriter_core::{EncoderConfig, IndexedEncoder, PackedRaster, Tint};
use wasm_bindgen::prelude::*;

/// Tint text to a core tint; `None` means derive from transparency.
pub(crate) fn tint_from_option(tint: Option<&str>) -> Result<Tint, String> {
    match tint {
        Some(text) => Tint::parse(text).map_err(|e| e.to_string()),
        None => Ok(Tint::FromTransparency),
    }
}

/// Shared encode path. Returns the PNG bytes and the warning text, if any.
pub(crate) fn encode_raster(
    raster: &mut PackedRaster,
    tint: Tint,
    config: EncoderConfig,
) -> Result<(Vec<u8>, Option<String>), String> {
    let mut encoder = IndexedEncoder::with_config(config);
    let (png, summary) = encoder
        .encode_to_vec(raster, tint)
        .map_err(|e| e.to_string())?;
    Ok((png, summary.consistency_warning.map(|w| w.to_string())))
}

/// Encode interleaved RGBA bytes with the default configuration.
pub(crate) fn encode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    tint: Tint,
) -> Result<(Vec<u8>, Option<String>), String> {
    let mut raster = JsRaster::new(width, height, pixels.to_vec()).to_packed()?;
    encode_raster(&mut raster, tint, EncoderConfig::default())
}

#[cfg(target_arch = "wasm32")]
fn report_warning(warning: Option<String>) {
    if let Some(message) = warning {
        web_sys::console::warn_1(&JsValue::from_str(&message));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn report_warning(_warning: Option<String>) {}

/// Encode RGBA pixel data to an indexed PNG.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Atlas width in pixels
/// * `height` - Atlas height in pixels
/// * `tint` - Optional hex color (`#RRGGBB`, `#RRGGBBAA`, `#RGB`); omit it to
///   use a white palette and stamp the marker block
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - The marker block holds a visible colored pixel
/// - The tint cannot be parsed
#[wasm_bindgen]
pub fn encode_indexed_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    tint: Option<String>,
) -> Result<Vec<u8>, JsValue> {
    let tint = tint_from_option(tint.as_deref()).map_err(|e| JsValue::from_str(&e))?;
    let (png, warning) =
        encode_pixels(pixels, width, height, tint).map_err(|e| JsValue::from_str(&e))?;
    report_warning(warning);
    Ok(png)
}

/// Encode RGBA pixel data to an indexed PNG with a packed tint.
///
/// `color` is RGBA8888 (red in the high byte). The value 256, as returned by
/// [`parse_tint`] for `"transparency"`, selects the white palette and stamps
/// the marker block; any other value tints the palette with its RGB.
#[wasm_bindgen]
pub fn encode_indexed_png_with_color(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: u32,
) -> Result<Vec<u8>, JsValue> {
    let (png, warning) = encode_pixels(pixels, width, height, Tint::from_rgba(color))
        .map_err(|e| JsValue::from_str(&e))?;
    report_warning(warning);
    Ok(png)
}

/// Encode a `JsRaster` with an optional configuration object.
///
/// `config` may be `undefined`, or an object with any of `strict_pixels` and
/// `chunk_capacity`. On success the raster's pixels reflect the marker stamp.
#[wasm_bindgen]
pub fn encode_indexed_png_with_config(
    image: &mut JsRaster,
    tint: Option<String>,
    config: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let config: EncoderConfig = if config.is_undefined() || config.is_null() {
        EncoderConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let tint = tint_from_option(tint.as_deref()).map_err(|e| JsValue::from_str(&e))?;
    let mut raster = image.to_packed().map_err(|e| JsValue::from_str(&e))?;
    let (png, warning) =
        encode_raster(&mut raster, tint, config).map_err(|e| JsValue::from_str(&e))?;
    image.update_from(&raster);
    report_warning(warning);
    Ok(png)
}

/// Parse a hex tint to a packed RGBA8888 value.
///
/// Returns 256 for `"transparency"`, the value that selects the white
/// palette when passed to [`encode_indexed_png_with_color`].
#[wasm_bindgen]
pub fn parse_tint(text: &str) -> Result<u32, JsValue> {
    match Tint::parse(text) {
        Ok(Tint::Solid(rgba)) => Ok(rgba),
        Ok(Tint::FromTransparency) => Ok(fontwriter_core::tint::TRANSPARENCY_SENTINEL),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Tests for encode bindings.
///
/// Note: The exported functions return `Result<T, JsValue>`, which only work on
/// wasm32 targets. These tests exercise the shared helpers they are built on.
#[cfg(test)]
mod tests {
    use super::*;
    use fontwriter_core::Raster;

    fn clear_atlas(width: u32, height: u32) -> PackedRaster {
        PackedRaster::filled(width, height, 0xFFFFFF00)
    }

    #[test]
    fn test_tint_from_option() {
        assert_eq!(tint_from_option(None).unwrap(), Tint::FromTransparency);
        assert_eq!(
            tint_from_option(Some("#ff0000")).unwrap(),
            Tint::Solid(0xFF0000FF)
        );
        assert!(tint_from_option(Some("not a color")).is_err());
    }

    #[test]
    fn test_encode_raster_produces_png() {
        let mut raster = clear_atlas(10, 10);
        let (png, warning) =
            encode_raster(&mut raster, Tint::FromTransparency, EncoderConfig::default()).unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        assert!(warning.is_none());
        assert_eq!(raster.pixel(9, 9), 0xFFFFFFFF);
    }

    #[test]
    fn test_encode_raster_reports_warning_text() {
        let mut raster = clear_atlas(10, 10);
        raster.set_pixel(0, 0, 0x112233FF);
        let (_, warning) =
            encode_raster(&mut raster, Tint::FromTransparency, EncoderConfig::default()).unwrap();
        assert!(warning.unwrap().contains("0x112233FF"));
    }

    #[test]
    fn test_encode_raster_error_text() {
        let mut raster = clear_atlas(10, 10);
        raster.set_pixel(9, 9, 0x00FF00FF);
        let err = encode_raster(&mut raster, Tint::FromTransparency, EncoderConfig::default())
            .unwrap_err();
        assert!(err.contains("transparency problem"));
    }

    #[test]
    fn test_packed_sentinel_selects_white_palette() {
        let mut corner = vec![0u8; 4 * 4 * 4];
        corner[..4].copy_from_slice(&[255, 255, 255, 200]);
        let from_sentinel = encode_pixels(
            &corner,
            4,
            4,
            Tint::from_rgba(fontwriter_core::tint::TRANSPARENCY_SENTINEL),
        )
        .unwrap()
        .0;
        let from_keyword = encode_pixels(&corner, 4, 4, Tint::FromTransparency)
            .unwrap()
            .0;
        assert_eq!(from_sentinel, from_keyword);

        // PLTE payload follows signature (8) and IHDR (25) plus its own header (8)
        assert_eq!(&from_sentinel[37..41], b"PLTE");
        assert_eq!(&from_sentinel[41..44], &[255, 255, 255]);
    }

    #[test]
    fn test_packed_color_tints_palette() {
        let pixels = vec![0u8; 4 * 4 * 4];
        let (png, _) = encode_pixels(&pixels, 4, 4, Tint::from_rgba(0xE74200FF)).unwrap();
        assert_eq!(&png[41..44], &[0xE7, 0x42, 0x00]);
    }

    #[test]
    fn test_encode_pixels_rejects_overflowing_dimensions() {
        let err = encode_pixels(&[], 1 << 31, 1 << 31, Tint::FromTransparency).unwrap_err();
        assert!(err.starts_with("Invalid pixel data"));
    }

    #[test]
    fn test_stamp_written_back_to_js_raster() {
        let mut image = JsRaster::new(4, 4, vec![0u8; 4 * 4 * 4]);
        let mut raster = image.to_packed().unwrap();
        encode_raster(&mut raster, Tint::FromTransparency, EncoderConfig::default()).unwrap();
        image.update_from(&raster);
        let pixels = image.pixels();
        assert_eq!(&pixels[pixels.len() - 4..], &[255, 255, 255, 255]);
        assert_eq!(&pixels[..4], &[0, 0, 0, 0]);
    }
}

/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_indexed_png_basic() {
        let pixels = vec![0u8; 16 * 16 * 4];
        let png = encode_indexed_png(&pixels, 16, 16, None).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_indexed_png_invalid_dimensions() {
        let result = encode_indexed_png(&[], 0, 16, None);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_indexed_png_bad_tint() {
        let pixels = vec![0u8; 4 * 4 * 4];
        let result = encode_indexed_png(&pixels, 4, 4, Some("nope".to_string()));
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_with_config_updates_raster() {
        let mut image = JsRaster::new(8, 8, vec![0u8; 8 * 8 * 4]);
        let png = encode_indexed_png_with_config(&mut image, None, JsValue::UNDEFINED).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let pixels = image.pixels();
        assert_eq!(&pixels[pixels.len() - 4..], &[255, 255, 255, 255]);
    }

    #[wasm_bindgen_test]
    fn test_encode_indexed_png_with_color_sentinel() {
        let pixels = vec![0u8; 8 * 8 * 4];
        let png = encode_indexed_png_with_color(&pixels, 8, 8, 256).unwrap();
        assert_eq!(png, encode_indexed_png(&pixels, 8, 8, None).unwrap());
    }

    #[wasm_bindgen_test]
    fn test_encode_indexed_png_huge_dimensions() {
        assert!(encode_indexed_png(&[], 1 << 31, 1 << 31, None).is_err());
    }

    #[wasm_bindgen_test]
    fn test_parse_tint() {
        assert_eq!(parse_tint("#E74200").unwrap(), 0xE74200FF);
        assert_eq!(parse_tint("transparency").unwrap(), 256);
        assert!(parse_tint("xyz!").is_err());
    }
}
