//! Streaming zlib adapter and reusable row scratch.

use flate2::{Compress, Compression, FlushCompress, Status};

use crate::chunk::ChunkWriter;
use crate::error::EncodeError;

/// Fixed zlib level for the pixel stream. Atlases are handed to an external
/// lossless optimizer afterwards, so the encoder only stores.
pub(crate) const COMPRESSION_LEVEL: u32 = 0;

/// Output reserved per compressor call.
const OUT_STEP: usize = 16 * 1024;

/// A persistent zlib compressor whose output goes straight into the open
/// chunk of a [`ChunkWriter`].
pub(crate) struct RowDeflater {
    compress: Compress,
    out: Vec<u8>,
}

impl RowDeflater {
    pub(crate) fn new() -> Self {
        Self {
            compress: Compress::new(Compression::new(COMPRESSION_LEVEL), true),
            out: Vec::with_capacity(OUT_STEP),
        }
    }

    /// Start a fresh zlib stream.
    pub(crate) fn reset(&mut self) {
        self.compress.reset();
        self.out.clear();
    }

    /// Compress `input` and append whatever the compressor emits to `chunk`.
    pub(crate) fn write(
        &mut self,
        mut input: &[u8],
        chunk: &mut ChunkWriter,
    ) -> Result<(), EncodeError> {
        while !input.is_empty() {
            self.out.clear();
            self.out.reserve(OUT_STEP);
            let before = self.compress.total_in();
            self.compress
                .compress_vec(input, &mut self.out, FlushCompress::None)?;
            let consumed = (self.compress.total_in() - before) as usize;
            input = &input[consumed..];
            chunk.write(&self.out)?;
        }
        Ok(())
    }

    /// Flush and terminate the stream into `chunk`.
    pub(crate) fn finish(&mut self, chunk: &mut ChunkWriter) -> Result<(), EncodeError> {
        loop {
            self.out.clear();
            self.out.reserve(OUT_STEP);
            let status = self
                .compress
                .compress_vec(&[], &mut self.out, FlushCompress::Finish)?;
            chunk.write(&self.out)?;
            if status == Status::StreamEnd {
                return Ok(());
            }
        }
    }

    /// Uncompressed bytes consumed by the current stream.
    pub(crate) fn total_in(&self) -> u64 {
        self.compress.total_in()
    }
}

/// Current and previous row buffers, reused across encodes.
///
/// Rows are never filtered, so the previous row is not read while encoding;
/// it is still cleared over the last encoded width so no stale bytes from an
/// earlier, wider raster survive.
pub(crate) struct RowBuffers {
    current: Vec<u8>,
    previous: Vec<u8>,
    last_len: usize,
}

impl RowBuffers {
    pub(crate) fn new() -> Self {
        Self {
            current: Vec::new(),
            previous: Vec::new(),
            last_len: 0,
        }
    }

    /// Grow both buffers to at least `len` and clear the previous row.
    pub(crate) fn prepare(&mut self, len: usize) {
        if self.current.len() < len {
            self.current.resize(len, 0);
            self.previous.resize(len, 0);
        }
        self.previous[..self.last_len].fill(0);
        self.last_len = len;
    }

    /// The current row, `len` bytes as given to [`prepare`](Self::prepare).
    pub(crate) fn current_mut(&mut self) -> &mut [u8] {
        &mut self.current[..self.last_len]
    }

    pub(crate) fn current(&self) -> &[u8] {
        &self.current[..self.last_len]
    }

    /// Rotate: the current row becomes the previous one.
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.current.len()
    }

    #[cfg(test)]
    pub(crate) fn previous(&self) -> &[u8] {
        &self.previous
    }
}
