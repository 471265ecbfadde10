//! Linechunk is a library to read lines and NUL-terminated chunks from byte
//! streams into owned buffers.
//!
//! Core functionality provided:
//! - Chunks: Read bytes up to and including a NUL byte or (optionally) a
//!   newline, or up to end of stream. See [read_chunk].
//! - Lines: Read a line keeping its terminator ([read_line]) or with a
//!   trailing newline removed ([read_line_trimmed]).
//! - Byte sources: Read from memory
//!   ([InMemoryByteSource](crate::source::InMemoryByteSource)) or from any
//!   buffered reader ([ReaderByteSource](crate::source::ReaderByteSource)).
//! - Configurability via [ChunkReaderBuilder](crate::reader::ChunkReaderBuilder):
//!   - Byte-wise reading (default, binary-safe) or block reading (faster,
//!     but NUL bytes do not end a line)
//!   - Buffer growth step and block size
//!   - Whether read errors end a chunk like end of stream (default) or are
//!     reported
//!
//! Every returned [Chunk] is followed by a NUL byte that is not part of its
//! length. End of stream is `Ok(None)`; no buffer is allocated for it.
//!
//! Limitations:
//! - No encoding handling, bytes are bytes
//! - No line-ending normalization (`\r\n` keeps its `\r`)
//!
//! # Usage patterns
//! 1. The functions at the crate root read with default settings.
//! 2. Configure a [ChunkReader](crate::reader::ChunkReader) for full control.
//!
//! ## Example Default Configuration
//!
//! ```
//! use linechunk::read_line;
//! use linechunk::source::InMemoryByteSource;
//!
//! let mut source = InMemoryByteSource::from_slice(b"ab\ncd");
//! assert_eq!(read_line(&mut source)?.unwrap().as_bytes(), b"ab\n");
//! assert_eq!(read_line(&mut source)?.unwrap().as_bytes(), b"cd");
//! assert!(read_line(&mut source)?.is_none());
//! # Ok::<(), linechunk::ReadError>(())
//! ```
//!
//! ## Example Reader Configuration
//!
//! ```no_run
//! use linechunk::reader::ChunkReaderBuilder;
//! use linechunk::source::ReaderByteSource;
//!
//! let reader = ChunkReaderBuilder::new().block_wise().build();
//! let mut source = ReaderByteSource::from_file("huge.log")?;
//! while let Some(line) = reader.read_line_trimmed(&mut source)? {
//!     println!("{} bytes", line.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod reader;
pub mod source;

pub use crate::reader::{Chunk, DelimiterMode, ReadError};

use crate::reader::ChunkReader;
use crate::source::ByteSource;

// ============================================================================
// Quick API
// ============================================================================
/// Reads the next chunk from `source` using the default byte-wise reader.
///
/// See [`ChunkReader::read_chunk`] for full documentation.
pub fn read_chunk<S: ByteSource + ?Sized>(
    source: &mut S,
    mode: DelimiterMode,
) -> Result<Option<Chunk>, ReadError> {
    ChunkReader::default().read_chunk(source, mode)
}

/// Reads the next line, including the newline or NUL it ended on.
///
/// See [`ChunkReader::read_line`] for full documentation.
pub fn read_line<S: ByteSource + ?Sized>(source: &mut S) -> Result<Option<Chunk>, ReadError> {
    ChunkReader::default().read_line(source)
}

/// Reads the next line with a trailing newline removed.
///
/// See [`ChunkReader::read_line_trimmed`] for full documentation.
pub fn read_line_trimmed<S: ByteSource + ?Sized>(
    source: &mut S,
) -> Result<Option<Chunk>, ReadError> {
    ChunkReader::default().read_line_trimmed(source)
}
