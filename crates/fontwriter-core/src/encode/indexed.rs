//! The indexed atlas encoder.

use std::io::Write;

use log::{debug, info, warn};

use super::deflate::{RowBuffers, RowDeflater};
use super::marker::{in_marker, stamp_marker, validate_marker};
use super::{
    BIT_DEPTH, COLOR_TYPE_INDEXED, COMPRESSION_DEFLATE, FILTER_METHOD_ADAPTIVE, FILTER_NONE, IDAT,
    IEND, IHDR, INTERLACE_NONE, PALETTE_ENTRIES, PLTE, SIGNATURE, TRNS,
};
use crate::chunk::ChunkWriter;
use crate::config::EncoderConfig;
use crate::error::{EncodeError, PixelConsistencyWarning};
use crate::raster::Raster;
use crate::tint::Tint;

const UNNAMED: &str = "<unnamed>";

/// Outcome of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    pub width: u32,
    pub height: u32,
    /// Total bytes handed to the sink, signature included.
    pub bytes_written: u64,
    /// The first colored, partially covered pixel, if any. Reported once.
    pub consistency_warning: Option<PixelConsistencyWarning>,
}

/// Encoder for single-color, alpha-indexed PNG atlases.
///
/// The chunk buffer, zlib state and row buffers live in the encoder and are
/// reused by every call, so keep one encoder per worker and feed it atlases
/// one after another.
pub struct IndexedEncoder {
    config: EncoderConfig,
    chunk: ChunkWriter,
    deflater: RowDeflater,
    rows: RowBuffers,
}

impl IndexedEncoder {
    /// Create an encoder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self {
            chunk: ChunkWriter::with_capacity(config.chunk_capacity),
            deflater: RowDeflater::new(),
            rows: RowBuffers::new(),
            config,
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `raster` to `sink`.
    ///
    /// With [`Tint::FromTransparency`] the marker block is validated and then
    /// stamped opaque white in place; with [`Tint::Solid`] it is left alone.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InvalidInput`] for a zero dimension
    /// - [`EncodeError::TransparencyViolation`] if the marker block holds a
    ///   visible colored pixel
    /// - [`EncodeError::PixelConsistency`] in strict mode
    /// - [`EncodeError::Io`] if the sink fails
    ///
    /// The first three are raised before anything is written. A sink failure
    /// leaves whatever was already written; cleaning up is up to the caller.
    pub fn encode<R, W>(
        &mut self,
        raster: &mut R,
        tint: Tint,
        sink: &mut W,
    ) -> Result<EncodeSummary, EncodeError>
    where
        R: Raster + ?Sized,
        W: Write,
    {
        let width = raster.width();
        let height = raster.height();
        if width == 0 || height == 0 {
            return Err(EncodeError::InvalidInput { width, height });
        }
        let name = raster.name().unwrap_or(UNNAMED).to_string();

        if tint.stamps_marker() {
            validate_marker(&*raster, &name)?;
            stamp_marker(raster);
        }

        let consistency_warning = find_inconsistent_pixel(&*raster, &name);
        if let Some(warning) = &consistency_warning {
            if self.config.strict_pixels {
                return Err(EncodeError::PixelConsistency(warning.clone()));
            }
            warn!("{warning}");
        }

        info!("Encoding {name} ({width}x{height}) as indexed PNG with {tint:?}");
        self.chunk.discard();

        sink.write_all(&SIGNATURE)?;
        let mut written = SIGNATURE.len();
        written += self.write_header(width, height, sink)?;
        written += self.write_palette(tint, sink)?;
        written += self.write_transparency(sink)?;
        written += self.write_pixels(&*raster, sink)?;
        self.chunk.begin_chunk(IEND)?;
        written += self.chunk.end_chunk(sink)?;
        sink.flush()?;

        info!("Encoded {name}: {written} bytes");
        Ok(EncodeSummary {
            width,
            height,
            bytes_written: written as u64,
            consistency_warning,
        })
    }

    /// Encode with [`Tint::FromTransparency`].
    pub fn encode_default<R, W>(
        &mut self,
        raster: &mut R,
        sink: &mut W,
    ) -> Result<EncodeSummary, EncodeError>
    where
        R: Raster + ?Sized,
        W: Write,
    {
        self.encode(raster, Tint::FromTransparency, sink)
    }

    /// Encode into a fresh `Vec<u8>`.
    pub fn encode_to_vec<R>(
        &mut self,
        raster: &mut R,
        tint: Tint,
    ) -> Result<(Vec<u8>, EncodeSummary), EncodeError>
    where
        R: Raster + ?Sized,
    {
        let mut out = Vec::new();
        let summary = self.encode(raster, tint, &mut out)?;
        Ok((out, summary))
    }

    fn write_header<W: Write>(
        &mut self,
        width: u32,
        height: u32,
        sink: &mut W,
    ) -> Result<usize, EncodeError> {
        self.chunk.begin_chunk(IHDR)?;
        self.chunk.write_u32(width)?;
        self.chunk.write_u32(height)?;
        self.chunk.write(&[
            BIT_DEPTH,
            COLOR_TYPE_INDEXED,
            COMPRESSION_DEFLATE,
            FILTER_METHOD_ADAPTIVE,
            INTERLACE_NONE,
        ])?;
        self.chunk.end_chunk(sink)
    }

    fn write_palette<W: Write>(&mut self, tint: Tint, sink: &mut W) -> Result<usize, EncodeError> {
        let rgb = tint.palette_rgb();
        self.chunk.begin_chunk(PLTE)?;
        for _ in 0..PALETTE_ENTRIES {
            self.chunk.write(&rgb)?;
        }
        self.chunk.end_chunk(sink)
    }

    fn write_transparency<W: Write>(&mut self, sink: &mut W) -> Result<usize, EncodeError> {
        let ramp: [u8; PALETTE_ENTRIES] = std::array::from_fn(|i| i as u8);
        self.chunk.begin_chunk(TRNS)?;
        self.chunk.write(&ramp)?;
        self.chunk.end_chunk(sink)
    }

    fn write_pixels<R, W>(&mut self, raster: &R, sink: &mut W) -> Result<usize, EncodeError>
    where
        R: Raster + ?Sized,
        W: Write,
    {
        let width = raster.width();
        let height = raster.height();

        self.chunk.begin_chunk(IDAT)?;
        self.deflater.reset();
        self.rows.prepare(width as usize);

        for y in 0..height {
            for (x, index) in self.rows.current_mut().iter_mut().enumerate() {
                *index = (raster.pixel(x as u32, y) & 0xFF) as u8;
            }
            self.deflater.write(&[FILTER_NONE], &mut self.chunk)?;
            self.deflater.write(self.rows.current(), &mut self.chunk)?;
            self.rows.swap();
        }
        self.deflater.finish(&mut self.chunk)?;

        debug!(
            "Pixel stream: {} raw bytes, {} compressed",
            self.deflater.total_in(),
            self.chunk.payload_len()
        );
        self.chunk.end_chunk(sink)
    }
}

impl Default for IndexedEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first pixel outside the marker block that has coverage but is
/// not white.
fn find_inconsistent_pixel<R: Raster + ?Sized>(
    raster: &R,
    name: &str,
) -> Option<PixelConsistencyWarning> {
    let width = raster.width();
    let height = raster.height();
    for y in 0..height {
        for x in 0..width {
            if in_marker(x, y, width, height) {
                continue;
            }
            let color = raster.pixel(x, y);
            if color & 0xFF != 0 && color & 0xFFFF_FF00 != 0xFFFF_FF00 {
                return Some(PixelConsistencyWarning {
                    raster: name.to_string(),
                    color,
                    x,
                    y,
                });
            }
        }
    }
    None
}

/// Encode `raster` with a one-off encoder.
///
/// Convenient for single images; reuse an [`IndexedEncoder`] when encoding
/// many atlases.
pub fn encode_indexed_png<R: Raster + ?Sized>(
    raster: &mut R,
    tint: Tint,
) -> Result<Vec<u8>, EncodeError> {
    let (png, _) = IndexedEncoder::new().encode_to_vec(raster, tint)?;
    Ok(png)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::encode::marker_bounds;
    use crate::raster::PackedRaster;
    use proptest::prelude::*;

    /// Strategy for generating atlas dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    /// Strategy for white-glyph rasters with a clear marker block.
    fn atlas_strategy() -> impl Strategy<Value = PackedRaster> {
        dimensions_strategy().prop_flat_map(|(w, h)| {
            let size = (w as usize) * (h as usize);
            prop::collection::vec(any::<u8>(), size..=size).prop_map(move |alphas| {
                let pixels = alphas.iter().map(|&a| 0xFFFF_FF00 | a as u32).collect();
                let mut raster = PackedRaster::from_pixels(w, h, pixels).unwrap();
                let (x0, y0, x1, y1) = marker_bounds(w, h);
                for y in y0..y1 {
                    for x in x0..x1 {
                        raster.set_pixel(x, y, 0);
                    }
                }
                raster
            })
        })
    }

    proptest! {
        /// Property: Every valid atlas encodes with correct framing.
        #[test]
        fn prop_valid_atlas_encodes(mut raster in atlas_strategy()) {
            let (png, summary) = IndexedEncoder::new()
                .encode_to_vec(&mut raster, Tint::FromTransparency)
                .unwrap();
            prop_assert_eq!(&png[..8], &SIGNATURE);
            prop_assert_eq!(summary.bytes_written, png.len() as u64);
            prop_assert!(summary.consistency_warning.is_none());
            // IEND frame closes the file
            prop_assert_eq!(&png[png.len() - 12..png.len() - 8], &[0, 0, 0, 0]);
            prop_assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
        }

        /// Property: A visible colored pixel in the marker block always fails.
        #[test]
        fn prop_colored_marker_fails(
            mut raster in atlas_strategy(),
            dx in 0u32..3,
            dy in 0u32..3,
            rgb in 1u32..=0xFF_FFFF,
            alpha in 1u32..=255,
        ) {
            let x = raster.width().saturating_sub(1 + dx);
            let y = raster.height().saturating_sub(1 + dy);
            raster.set_pixel(x, y, rgb << 8 | alpha);
            let mut out = Vec::new();
            let result = IndexedEncoder::new().encode_default(&mut raster, &mut out);
            let failed = matches!(result, Err(EncodeError::TransparencyViolation { .. }));
            prop_assert!(
                failed || rgb << 8 | alpha == crate::raster::OPAQUE_WHITE,
                "colored marker pixel should be rejected"
            );
            if failed {
                prop_assert!(out.is_empty());
            }
        }

        /// Property: Second encode of a stamped raster is byte-identical.
        #[test]
        fn prop_idempotent(mut raster in atlas_strategy()) {
            let mut encoder = IndexedEncoder::new();
            let (first, _) = encoder.encode_to_vec(&mut raster, Tint::FromTransparency).unwrap();
            let (second, _) = encoder.encode_to_vec(&mut raster, Tint::FromTransparency).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
