//! Error types for atlas encoding.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while encoding an indexed atlas.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidInput { width: u32, height: u32 },

    /// The reserved bottom-right marker block holds a visible, colored pixel.
    ///
    /// Raised before any byte reaches the sink.
    #[error(
        "Had a transparency problem with {raster}: marker pixel ({x},{y}) is 0x{color:08X}, \
         expected fully transparent or black"
    )]
    TransparencyViolation {
        raster: String,
        x: u32,
        y: u32,
        color: u32,
    },

    /// A pixel mixes partial coverage with a non-white color (strict mode only).
    #[error("{0}")]
    PixelConsistency(PixelConsistencyWarning),

    /// The tint text could not be parsed as a hex color.
    #[error("Invalid tint color: {0:?}")]
    InvalidTint(String),

    /// `begin_chunk` was called while another chunk was still open.
    #[error("Chunk {} is still open", String::from_utf8_lossy(.0))]
    ChunkAlreadyOpen([u8; 4]),

    /// A chunk payload exceeds the 2^31 - 1 byte limit of the length field.
    #[error("Chunk {} is too large: {len} bytes (at most 2147483647)", String::from_utf8_lossy(.tag))]
    ChunkTooLarge { tag: [u8; 4], len: usize },

    /// Payload bytes were written with no chunk open.
    #[error("No chunk is open")]
    NoOpenChunk,

    /// The zlib stream for the pixel data could not be produced.
    #[error("Compression failed: {0}")]
    Compression(#[from] flate2::CompressError),

    /// The source atlas could not be decoded.
    #[error("Image decoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// The sink rejected a write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// First pixel of an encode whose alpha is nonzero but whose RGB is not white.
///
/// Atlas glyphs are white with coverage in the alpha channel, so anything else
/// means the generator produced colored output the palette cannot represent.
/// The pixel is still written using its alpha byte as the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelConsistencyWarning {
    /// Name of the raster, or `<unnamed>`.
    pub raster: String,
    /// Packed RGBA8888 value of the offending pixel.
    pub color: u32,
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for PixelConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Problem with {}: color 0x{:08X} at position {},{}",
            self.raster, self.color, self.x, self.y
        )
    }
}
