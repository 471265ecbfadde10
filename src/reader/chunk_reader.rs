//! Structs and logic to read chunks and lines from a [ByteSource].
//!
//! This module provides the [ChunkReaderBuilder] and [ChunkReader] structs.
//! A [ChunkReader] is an immutable configuration; all state of a read lives
//! in the call and in the source's read position.

use log::{debug, trace, warn};

use crate::reader::chunk::Chunk;
use crate::reader::read_error::ReadError;
use crate::source::ByteSource;

// =#========================================================================#=
// DELIMITER MODE
// =#========================================================================€=
/// Which bytes end a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterMode {
    /// Only a NUL byte ends a chunk; newlines are ordinary data.
    NulOnly,
    /// A NUL byte or a newline ends a chunk.
    NulOrNewline,
}

impl From<bool> for DelimiterMode {
    /// Maps a "detect newline" flag to the corresponding mode.
    fn from(detect_newline: bool) -> Self {
        if detect_newline {
            DelimiterMode::NulOrNewline
        } else {
            DelimiterMode::NulOnly
        }
    }
}

// =#========================================================================#=
// READ STRATEGY
// =#========================================================================€=
/// Controls how bytes are pulled from the source for newline-delimited reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Read one byte at a time. Stops at NUL bytes, so it is binary-safe.
    /// This is the default.
    ByteWise,

    /// Read up to a block at a time, stopping only after a newline.
    ///
    /// Roughly twice as fast on long lines, but NUL bytes do not end a line;
    /// they stay inside the returned chunk. The buffer is not shrunk after
    /// reading. Reads in [DelimiterMode::NulOnly] always use
    /// [ReadStrategy::ByteWise].
    Block,
}

// =#========================================================================#=
// IO ERROR POLICY
// =#========================================================================€=
/// What a read does when the source reports a read error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorPolicy {
    /// End the chunk as if at end of stream and return the bytes read so far.
    /// The error stays in the source ([ByteSource::take_error]).
    /// This is the default.
    TreatAsEof,

    /// Drop the bytes read so far and return [ReadErrorKind::Io](crate::reader::ReadErrorKind::Io).
    ///
    /// Only errors raised during the read itself are reported. An error left
    /// in the source by an earlier call (including [ByteSource::is_eof]) is
    /// discarded when the read starts.
    Report,
}

// =#========================================================================#=
// CHUNK READER BUILDER
// =#========================================================================$=
/// Builder for configuring and creating a [ChunkReader].
///
/// # Configuration Options
/// * **Read strategy**: [byte_wise()](Self::byte_wise) (default) or
///   [block_wise()](Self::block_wise)
/// * **Growth step**: bytes added to the buffer whenever it is full in the
///   byte-wise strategy (default: 80)
/// * **Block size**: bytes allocated per round in the block strategy
///   (default: 256)
/// * **IO error policy**: see [IoErrorPolicy] (default: treat as EOF)
///
/// # Example
/// ```
/// use linechunk::reader::{ChunkReaderBuilder, IoErrorPolicy};
/// use linechunk::source::InMemoryByteSource;
///
/// let reader = ChunkReaderBuilder::new()
///     .block_wise()
///     .with_block_size(64)
///     .with_io_error_policy(IoErrorPolicy::Report)
///     .build();
///
/// let mut source = InMemoryByteSource::from_slice(b"kea\nkaka\n");
/// let line = reader.read_line_trimmed(&mut source)?.unwrap();
/// assert_eq!(line.as_bytes(), b"kea");
/// # Ok::<(), linechunk::reader::ReadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChunkReaderBuilder {
    strategy: ReadStrategy,
    growth_step: usize,
    block_size: usize,
    io_error_policy: IoErrorPolicy,
}

impl Default for ChunkReaderBuilder {
    fn default() -> Self {
        Self {
            strategy: ReadStrategy::ByteWise,
            growth_step: ChunkReader::DEFAULT_GROWTH_STEP,
            block_size: ChunkReader::DEFAULT_BLOCK_SIZE,
            io_error_policy: IoErrorPolicy::TreatAsEof,
        }
    }
}

impl ChunkReaderBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the reader to read **one byte at a time** (default).
    pub fn byte_wise(mut self) -> Self {
        self.strategy = ReadStrategy::ByteWise;
        self
    }

    /// Configure the reader to read lines **in blocks**.
    ///
    /// See [ReadStrategy::Block] for the NUL-handling caveat.
    pub fn block_wise(mut self) -> Self {
        self.strategy = ReadStrategy::Block;
        self
    }

    /// Sets the number of bytes the buffer grows by when full
    /// (byte-wise strategy). Values below 1 are raised to 1.
    pub fn with_growth_step(mut self, step: usize) -> Self {
        self.growth_step = step.max(1);
        self
    }

    /// Sets the block size of the block strategy. One byte of every block is
    /// kept for the NUL terminator, so values below 2 are raised to 2.
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size.max(2);
        self
    }

    /// Sets how read errors of the source are handled.
    pub fn with_io_error_policy(mut self, policy: IoErrorPolicy) -> Self {
        self.io_error_policy = policy;
        self
    }

    /// Builds the configured [ChunkReader].
    pub fn build(self) -> ChunkReader {
        ChunkReader {
            strategy: self.strategy,
            growth_step: self.growth_step,
            block_size: self.block_size,
            io_error_policy: self.io_error_policy,
        }
    }
}

// =#========================================================================#=
// CHUNK READER
// =#========================================================================$=
/// Reads chunks and lines from a [ByteSource].
///
/// Each call blocks until a delimiter is read or the source runs out, and
/// advances the source by exactly the number of bytes returned. The source
/// is borrowed mutably for the duration of a call; it is never closed.
///
/// Use [ChunkReader::default()] for the binary-safe byte-wise reader, or
/// [ChunkReaderBuilder] for other configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkReader {
    strategy: ReadStrategy,
    growth_step: usize,
    block_size: usize,
    io_error_policy: IoErrorPolicy,
}

impl Default for ChunkReader {
    fn default() -> Self {
        ChunkReaderBuilder::default().build()
    }
}

// ============================================================================
// Configuration (pub)
// ============================================================================
impl ChunkReader {
    /// Default number of bytes the buffer grows by in the byte-wise strategy.
    pub const DEFAULT_GROWTH_STEP: usize = 80;

    /// Default block size of the block strategy.
    pub const DEFAULT_BLOCK_SIZE: usize = 256;

    /// Shortcut for [ChunkReaderBuilder::new()].
    pub fn builder() -> ChunkReaderBuilder {
        ChunkReaderBuilder::new()
    }

    pub fn strategy(&self) -> ReadStrategy {
        self.strategy
    }

    pub fn growth_step(&self) -> usize {
        self.growth_step
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn io_error_policy(&self) -> IoErrorPolicy {
        self.io_error_policy
    }
}

// ============================================================================
// Reading (pub)
// ============================================================================
impl ChunkReader {
    /// Reads the next chunk: bytes up to and including a NUL byte, or a
    /// newline if `mode` is [DelimiterMode::NulOrNewline], or up to end of
    /// stream.
    ///
    /// # Arguments
    /// * `source` - The stream to read from
    /// * `mode` - Which bytes end the chunk
    ///
    /// # Returns
    /// * `Ok(Some(chunk))` - At least one byte was read; `chunk.len()` counts
    ///   the terminator if one was read
    /// * `Ok(None)` - The source was already at end of stream; nothing was
    ///   allocated
    ///
    /// # Errors
    /// Returns a [ReadError] if the buffer cannot grow, or if the source
    /// reported a read error and the policy is [IoErrorPolicy::Report].
    ///
    /// # Example
    /// ```
    /// use linechunk::reader::{ChunkReader, DelimiterMode};
    /// use linechunk::source::InMemoryByteSource;
    ///
    /// let reader = ChunkReader::default();
    /// let mut source = InMemoryByteSource::from_slice(b"ab\ncd\0ef");
    ///
    /// let chunk = reader.read_chunk(&mut source, DelimiterMode::NulOnly)?.unwrap();
    /// assert_eq!(chunk.as_bytes(), b"ab\ncd\0");
    /// assert_eq!(chunk.len(), 6);
    /// # Ok::<(), linechunk::reader::ReadError>(())
    /// ```
    pub fn read_chunk<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
        mode: DelimiterMode,
    ) -> Result<Option<Chunk>, ReadError> {
        // Only errors raised during this read are reported
        if self.io_error_policy == IoErrorPolicy::Report {
            if let Some(stale) = source.take_error() {
                debug!("discarding read error from before this read: {stale}");
            }
        }

        let chunk = match (self.strategy, mode) {
            (ReadStrategy::Block, DelimiterMode::NulOrNewline) => {
                let buf = self.read_blocks(source)?;
                self.finish(source, buf, false)?
            }
            _ => {
                let buf = self.read_bytes(source, mode)?;
                self.finish(source, buf, true)?
            }
        };

        if let Some(chunk) = &chunk {
            trace!(
                "read chunk of {} bytes, source now at {}",
                chunk.len(),
                source.position()
            );
        }
        Ok(chunk)
    }

    /// Reads the next line, keeping the trailing newline (or NUL) it ended on.
    ///
    /// See [read_chunk()](Self::read_chunk) for return values and errors.
    pub fn read_line<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Option<Chunk>, ReadError> {
        self.read_chunk(source, DelimiterMode::NulOrNewline)
    }

    /// Reads the next line and removes a trailing newline in place.
    ///
    /// A line ending on a NUL byte or at end of stream is returned unchanged.
    /// The buffer is not reallocated after trimming. A line consisting of a
    /// single newline yields an empty chunk, not `None`.
    ///
    /// See [read_chunk()](Self::read_chunk) for return values and errors.
    pub fn read_line_trimmed<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Option<Chunk>, ReadError> {
        let mut line = self.read_line(source)?;
        if let Some(line) = line.as_mut() {
            line.trim_newline();
        }
        Ok(line)
    }
}

// ============================================================================
// Reading helpers (private)
// ============================================================================
impl ChunkReader {
    /// Byte-at-a-time loop, growing the buffer by `growth_step` when full.
    fn read_bytes<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
        mode: DelimiterMode,
    ) -> Result<Vec<u8>, ReadError> {
        let mut buf = Vec::new();
        while let Some(byte) = source.next_byte() {
            if buf.len() >= buf.capacity() {
                grow(&mut buf, self.growth_step, &*source)?;
            }
            buf.push(byte);
            if byte == 0 || (mode == DelimiterMode::NulOrNewline && byte == b'\n') {
                break;
            }
        }
        Ok(buf)
    }

    /// Block loop: each round makes room for a whole block and reads up to
    /// `block_size - 1` bytes. A short round or a trailing newline ends it.
    /// Nothing is allocated if the source is already exhausted.
    fn read_blocks<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<Vec<u8>, ReadError> {
        let per_round = self.block_size - 1;
        let mut buf = Vec::new();
        if source.is_eof() {
            return Ok(buf);
        }
        loop {
            grow(&mut buf, self.block_size, &*source)?;
            let read = source.read_line_block(&mut buf, per_round);
            if read != per_round || buf.last() == Some(&b'\n') {
                break;
            }
        }
        Ok(buf)
    }

    /// Applies the IO error policy and NUL-terminates the buffer.
    /// With `shrink`, the buffer ends up with capacity for exactly the
    /// logical bytes plus the terminator.
    fn finish<S: ByteSource + ?Sized>(
        &self,
        source: &mut S,
        mut buf: Vec<u8>,
        shrink: bool,
    ) -> Result<Option<Chunk>, ReadError> {
        if self.io_error_policy == IoErrorPolicy::Report {
            if let Some(err) = source.take_error() {
                return Err(ReadError::io(err, &*source));
            }
        }

        if buf.is_empty() {
            return Ok(None);
        }

        if shrink {
            buf.shrink_to(buf.len() + 1);
        }
        if buf.len() == buf.capacity() {
            grow(&mut buf, 1, &*source)?;
        }
        buf.push(0);

        Ok(Some(Chunk::from_nul_terminated(buf)))
    }
}

/// Reserves exactly `additional` more bytes, mapping failure to a [ReadError].
fn grow<S: ByteSource + ?Sized>(
    buf: &mut Vec<u8>,
    additional: usize,
    source: &S,
) -> Result<(), ReadError> {
    buf.try_reserve_exact(additional).map_err(|_| {
        warn!(
            "could not grow chunk buffer of {} bytes by {additional}",
            buf.len()
        );
        ReadError::allocation_failed(additional, source)
    })
}

// =#========================================================================#=
// TESTS - CHUNK READER
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryByteSource;

    #[test]
    fn test_byte_wise_grows_in_steps() {
        let data = vec![b'x'; 200];
        let mut source = InMemoryByteSource::from_vec(data);
        let reader = ChunkReader::builder().with_growth_step(80).build();

        let chunk = reader.read_line(&mut source).unwrap().unwrap();
        assert_eq!(chunk.len(), 200);
        assert_eq!(chunk.capacity(), 201);
    }

    #[test]
    fn test_growth_step_of_one() {
        let mut source = InMemoryByteSource::from_slice(b"abc\n");
        let reader = ChunkReader::builder().with_growth_step(0).build();
        assert_eq!(reader.growth_step(), 1);

        let chunk = reader.read_line(&mut source).unwrap().unwrap();
        assert_eq!(chunk.as_bytes_with_nul(), b"abc\n\0");
        assert_eq!(chunk.capacity(), 5);
    }

    #[test]
    fn test_block_size_is_clamped() {
        let reader = ChunkReader::builder().block_wise().with_block_size(0).build();
        assert_eq!(reader.block_size(), 2);

        let mut source = InMemoryByteSource::from_slice(b"abc\nd");
        let line = reader.read_line(&mut source).unwrap().unwrap();
        assert_eq!(line.as_bytes(), b"abc\n");
        let line = reader.read_line(&mut source).unwrap().unwrap();
        assert_eq!(line.as_bytes(), b"d");
        assert!(reader.read_line(&mut source).unwrap().is_none());
    }

    #[test]
    fn test_block_chunk_is_not_shrunk() {
        let mut source = InMemoryByteSource::from_slice(b"ab\n");
        let reader = ChunkReader::builder().block_wise().build();
        let chunk = reader.read_line(&mut source).unwrap().unwrap();
        assert_eq!(chunk.len(), 3);
        assert!(chunk.capacity() >= ChunkReader::DEFAULT_BLOCK_SIZE);
    }

    #[test]
    fn test_detect_newline_flag() {
        assert_eq!(DelimiterMode::from(true), DelimiterMode::NulOrNewline);
        assert_eq!(DelimiterMode::from(false), DelimiterMode::NulOnly);
    }

    #[test]
    fn test_defaults() {
        let reader = ChunkReader::default();
        assert_eq!(reader.strategy(), ReadStrategy::ByteWise);
        assert_eq!(reader.growth_step(), 80);
        assert_eq!(reader.block_size(), 256);
        assert_eq!(reader.io_error_policy(), IoErrorPolicy::TreatAsEof);
    }
}
