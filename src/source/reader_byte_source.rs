//! Buffered reader implementation of byte source.
//!
//! This module provides [ReaderByteSource], which wraps any [BufRead]
//! (a [BufReader] around a file, stdin, a socket, ...) for streaming input.
//! Use this when the data should not be loaded into memory at once.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;
use memchr::memchr;

use crate::source::byte_source::ByteSource;

// =#========================================================================#=
// READER BYTE SOURCE
// =#========================================================================$=
/// A byte source streaming from a buffered reader.
///
/// Read errors end the data as seen through [ByteSource::next_byte], but are
/// kept and can be retrieved with [ByteSource::take_error].
/// [io::ErrorKind::Interrupted] is retried transparently.
pub struct ReaderByteSource<R: BufRead> {
    /// Underlying reader, handles getting chunks from the stream
    reader: R,

    /// Number of bytes consumed so far
    pos: usize,

    /// Last read error not yet taken by the caller
    error: Option<io::Error>,
}

impl ReaderByteSource<BufReader<File>> {
    /// Creates a new buffered byte source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReaderByteSource<R> {
    /// Wraps a buffered reader positioned at an arbitrary offset.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pos: 0,
            error: None,
        }
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Unwraps this source, returning the underlying reader.
    ///
    /// Bytes already buffered but not consumed stay in the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Returns the next byte without consuming it, with a single buffer
    /// lookup. `None` means end of data or a (recorded) read error.
    fn peek_byte(&mut self) -> Option<u8> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("read error at byte {} treated as end of data: {e}", self.pos);
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }

    /// Makes sure the reader has buffered data, returning how many bytes are
    /// available. `0` means end of data or a (recorded) read error.
    fn fill(&mut self) -> usize {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return buf.len(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("read error at byte {} treated as end of data: {e}", self.pos);
                    self.error = Some(e);
                    return 0;
                }
            }
        }
    }
}

impl<R: BufRead> ByteSource for ReaderByteSource<R> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.reader.consume(1);
        self.pos += 1;
        Some(byte)
    }

    fn read_line_block(&mut self, out: &mut Vec<u8>, max: usize) -> usize {
        let mut total = 0;
        while total < max {
            if self.fill() == 0 {
                break;
            }
            let Ok(buf) = self.reader.fill_buf() else {
                break;
            };
            let window = &buf[..buf.len().min(max - total)];
            let (take, found_newline) = match memchr(b'\n', window) {
                Some(i) => (i + 1, true),
                None => (window.len(), false),
            };
            out.extend_from_slice(&window[..take]);
            self.reader.consume(take);
            self.pos += take;
            total += take;
            if found_newline {
                break;
            }
        }
        total
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.fill() == 0
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}
