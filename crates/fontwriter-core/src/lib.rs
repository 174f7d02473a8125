//! Fontwriter Core - indexed PNG encoding for font atlases
//!
//! This crate turns the RGBA atlas produced by a distance-field glyph
//! generator into a compact 8-bit palette PNG: one color for all 256 palette
//! entries and an identity transparency ramp, so each pixel stores only its
//! coverage. It also reserves the bottom-right 3x3 block of the atlas as a
//! solid white texel for tinting.
//!
//! # Module Structure
//!
//! - `chunk` - Length-prefixed, CRC-checked chunk framing
//! - `encode` - The indexed encoder and the marker block pass
//! - `raster` - Source raster trait and adapters
//! - `tint` - Palette color selection and hex parsing
//! - `config` - Encoder settings
//! - `process` - Re-encoding atlas files on disk

pub mod chunk;
pub mod config;
pub mod encode;
pub mod error;
pub mod process;
pub mod raster;
pub mod tint;

pub use config::EncoderConfig;
pub use encode::{encode_indexed_png, EncodeSummary, IndexedEncoder};
pub use error::{EncodeError, PixelConsistencyWarning};
pub use process::{process_file, process_preview, ProcessOutcome};
pub use raster::{PackedRaster, Raster};
pub use tint::Tint;
