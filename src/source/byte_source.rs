//! Byte source abstraction for chunk reading.
//!
//! This module provides the [ByteSource] trait, the stream interface consumed
//! by [ChunkReader](crate::reader::ChunkReader).

use std::io;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for streams read by the chunk reader.
///
/// This trait abstracts over different ways of accessing byte data:
/// - In-memory byte vectors ([InMemoryByteSource](crate::source::InMemoryByteSource))
/// - Any buffered reader ([ReaderByteSource](crate::source::ReaderByteSource))
///
/// A source signals end of data by returning `None` (or `0` bytes read).
/// Read errors also end the data from the caller's point of view; an
/// implementation that can fail keeps the error so it can be retrieved with
/// [take_error()](ByteSource::take_error).
pub trait ByteSource {
    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF) or a read error occurred
    fn next_byte(&mut self) -> Option<u8>;

    /// Appends up to `max` bytes to `out`, stopping right after the first
    /// newline (which is appended too).
    ///
    /// This is the block primitive used by the block read strategy. It does
    /// not treat NUL bytes specially.
    ///
    /// # Arguments
    /// * `out` - Vector the bytes are appended to
    /// * `max` - Maximum number of bytes to append
    ///
    /// # Returns
    /// The number of bytes appended; `0` at end of data or on read error
    fn read_line_block(&mut self, out: &mut Vec<u8>, max: usize) -> usize;

    /// Returns the number of bytes consumed from this source so far.
    fn position(&self) -> usize;

    /// Check if at end of data.
    ///
    /// A source that has to read to answer this may hit a read error; it then
    /// returns `true` and records the error for [take_error()](ByteSource::take_error).
    ///
    /// # Returns
    /// `true` if no further byte can be read, `false` otherwise
    fn is_eof(&mut self) -> bool;

    /// Takes the most recent read error, if any, leaving `None` behind.
    ///
    /// Sources that cannot fail keep the default implementation.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}
