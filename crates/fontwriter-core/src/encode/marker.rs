//! The bottom-right marker block.
//!
//! Font consumers sample the last 3x3 pixels of an atlas to find a solid
//! white texel they can tint. Before stamping, the block must hold nothing a
//! glyph could need: every pixel has to be transparent or black.

use crate::error::EncodeError;
use crate::raster::{Raster, OPAQUE_WHITE};

/// Side length of the square marker block.
pub const MARKER_SIZE: u32 = 3;

/// Pixel bounds `(x0, y0, x1, y1)` of the marker block, half-open and clamped
/// to the raster, so rasters smaller than the block use all their pixels.
pub fn marker_bounds(width: u32, height: u32) -> (u32, u32, u32, u32) {
    (
        width.saturating_sub(MARKER_SIZE),
        height.saturating_sub(MARKER_SIZE),
        width,
        height,
    )
}

/// Whether `(x, y)` falls inside the marker block of a `width`x`height` raster.
#[inline]
pub(crate) fn in_marker(x: u32, y: u32, width: u32, height: u32) -> bool {
    let (x0, y0, _, _) = marker_bounds(width, height);
    x >= x0 && y >= y0
}

#[inline]
fn is_blank_or_stamped(color: u32) -> bool {
    // alpha is zero, or RGB is zero, or a previous encode already stamped it
    color & 0xFF == 0 || color >> 8 == 0 || color == OPAQUE_WHITE
}

/// Check that the marker block can be stamped.
///
/// Scans columns left to right and reports the first pixel that is both
/// visible and colored. A pixel passes when its alpha is zero or its RGB is
/// zero, so opaque black is accepted.
///
/// Opaque white (`0xFFFFFFFF`) also passes, although it is visible and
/// colored. It is exactly what [`stamp_marker`] writes, and accepting it lets
/// an atlas that was already encoded go through the encoder again with the
/// same result. The cost is that a generator which drew opaque white into the
/// block is not caught.
pub fn validate_marker<R: Raster + ?Sized>(raster: &R, name: &str) -> Result<(), EncodeError> {
    let (x0, y0, x1, y1) = marker_bounds(raster.width(), raster.height());
    for x in x0..x1 {
        for y in y0..y1 {
            let color = raster.pixel(x, y);
            if !is_blank_or_stamped(color) {
                return Err(EncodeError::TransparencyViolation {
                    raster: name.to_string(),
                    x,
                    y,
                    color,
                });
            }
        }
    }
    Ok(())
}

/// Fill the marker block with opaque white.
pub fn stamp_marker<R: Raster + ?Sized>(raster: &mut R) {
    let (x0, y0, x1, y1) = marker_bounds(raster.width(), raster.height());
    for y in y0..y1 {
        for x in x0..x1 {
            raster.set_pixel(x, y, OPAQUE_WHITE);
        }
    }
}
