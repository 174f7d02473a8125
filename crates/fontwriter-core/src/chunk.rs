//! Length-prefixed, CRC-checked chunk framing.
//!
//! A [`ChunkWriter`] buffers one chunk's payload at a time and writes the
//! whole frame in a single step:
//!
//! ```text
//! [length: u32 BE][type tag: 4 bytes][payload][CRC-32 of tag ++ payload: u32 BE]
//! ```
//!
//! Buffering first keeps the framing independent of the sink: the length is
//! known before anything is written, so the sink can be a file, a socket or
//! a `Vec<u8>` without needing `Seek`.
//!
//! # Example
//!
//! ```ignore
//! use fontwriter_core::chunk::ChunkWriter;
//!
//! let mut out = Vec::new();
//! let mut chunk = ChunkWriter::new();
//! chunk.begin_chunk(*b"IEND")?;
//! chunk.end_chunk(&mut out)?;
//! assert_eq!(out.len(), 12);
//! ```

use std::io::Write;

use flate2::Crc;
use log::debug;

use crate::error::EncodeError;

/// Default initial payload capacity; large enough for every chunk except
/// the pixel data of big atlases.
pub const DEFAULT_CHUNK_CAPACITY: usize = 65536;

/// Largest payload a PNG chunk may carry (2^31 - 1 bytes).
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

/// Length field for a payload of `len` bytes.
fn frame_length(tag: [u8; 4], len: usize) -> Result<u32, EncodeError> {
    if len > MAX_CHUNK_LEN {
        return Err(EncodeError::ChunkTooLarge { tag, len });
    }
    Ok(len as u32)
}

/// Sequential chunk builder. Only one chunk may be open at a time.
pub struct ChunkWriter {
    tag: Option<[u8; 4]>,
    payload: Vec<u8>,
    crc: Crc,
}

impl ChunkWriter {
    /// Create a writer with the default payload capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHUNK_CAPACITY)
    }

    /// Create a writer whose payload buffer starts at `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tag: None,
            payload: Vec::with_capacity(capacity),
            crc: Crc::new(),
        }
    }

    /// Open a new chunk. The CRC is reseeded with the tag bytes.
    pub fn begin_chunk(&mut self, tag: [u8; 4]) -> Result<(), EncodeError> {
        if let Some(open) = self.tag {
            return Err(EncodeError::ChunkAlreadyOpen(open));
        }
        self.payload.clear();
        self.crc.reset();
        self.crc.update(&tag);
        self.tag = Some(tag);
        Ok(())
    }

    /// Append payload bytes to the open chunk.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        if self.tag.is_none() {
            return Err(EncodeError::NoOpenChunk);
        }
        self.payload.extend_from_slice(bytes);
        self.crc.update(bytes);
        Ok(())
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.write(&[value])
    }

    /// Append a big-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write(&value.to_be_bytes())
    }

    /// Frame the open chunk onto `sink` and reset for the next one.
    ///
    /// Returns the number of bytes written, framing included. A payload over
    /// [`MAX_CHUNK_LEN`] is an [`EncodeError::ChunkTooLarge`] and nothing is
    /// written. The writer is reset even when this fails, so a later encode
    /// can start cleanly.
    pub fn end_chunk<W: Write>(&mut self, sink: &mut W) -> Result<usize, EncodeError> {
        let tag = self.tag.take().ok_or(EncodeError::NoOpenChunk)?;
        let checksum = self.crc.sum();
        let len = match frame_length(tag, self.payload.len()) {
            Ok(len) => len,
            Err(e) => {
                self.payload.clear();
                self.crc.reset();
                return Err(e);
            }
        };

        let mut header = [0u8; 8];
        header[..4].copy_from_slice(&len.to_be_bytes());
        header[4..].copy_from_slice(&tag);

        let result = sink
            .write_all(&header)
            .and_then(|()| sink.write_all(&self.payload))
            .and_then(|()| sink.write_all(&checksum.to_be_bytes()));

        self.payload.clear();
        self.crc.reset();
        result?;

        debug!(
            "Chunk {} written: {} payload bytes, crc {:08x}",
            String::from_utf8_lossy(&tag),
            len,
            checksum
        );
        Ok(len as usize + 12)
    }

    /// Drop any open chunk without writing it.
    pub fn discard(&mut self) {
        self.tag = None;
        self.payload.clear();
        self.crc.reset();
    }

    /// Whether a chunk is currently open.
    pub fn is_open(&self) -> bool {
        self.tag.is_some()
    }

    /// Number of payload bytes buffered in the open chunk.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

impl Default for ChunkWriter {
    fn default() -> Self {
        Self::new()
    }
}
