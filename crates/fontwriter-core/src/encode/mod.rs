//! Indexed PNG encoding for font atlases.
//!
//! This module provides functionality for:
//! - Validating and stamping the bottom-right marker block of an atlas
//! - Writing an 8-bit palette PNG whose palette is one color and whose
//!   transparency ramp maps index `i` to alpha `i`
//! - Streaming rows through a persistent zlib compressor
//!
//! # Output Layout
//!
//! ```text
//! signature | IHDR | PLTE (256 x RGB) | tRNS (0..=255) | IDAT | IEND
//! ```
//!
//! Each pixel is stored as the low byte of its packed RGBA8888 value, which is
//! its alpha. A distance-field atlas therefore keeps a single channel per
//! pixel, and any PNG decoder reconstructs the tinted RGBA image.
//!
//! # Examples
//!
//! ```ignore
//! use fontwriter_core::encode::IndexedEncoder;
//! use fontwriter_core::raster::PackedRaster;
//! use fontwriter_core::tint::Tint;
//!
//! let mut atlas = PackedRaster::filled(64, 64, 0x0000_0000);
//! let mut encoder = IndexedEncoder::new();
//! let (png, summary) = encoder.encode_to_vec(&mut atlas, Tint::FromTransparency).unwrap();
//! println!("Encoded {} bytes", summary.bytes_written);
//! ```

mod deflate;
mod indexed;
mod marker;

pub use indexed::{encode_indexed_png, EncodeSummary, IndexedEncoder};
pub use marker::{marker_bounds, stamp_marker, validate_marker, MARKER_SIZE};

/// PNG file signature.
pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

pub const IHDR: [u8; 4] = *b"IHDR";
pub const PLTE: [u8; 4] = *b"PLTE";
pub const TRNS: [u8; 4] = *b"tRNS";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// Bits per palette index.
pub const BIT_DEPTH: u8 = 8;
pub const COLOR_TYPE_INDEXED: u8 = 3;
pub const COMPRESSION_DEFLATE: u8 = 0;
pub const FILTER_METHOD_ADAPTIVE: u8 = 0;
pub const INTERLACE_NONE: u8 = 0;

/// Per-row filter tag. Rows are never filtered.
pub const FILTER_NONE: u8 = 0;

/// Number of palette and transparency entries.
pub const PALETTE_ENTRIES: usize = 256;
