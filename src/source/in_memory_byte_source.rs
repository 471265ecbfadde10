//! In-memory implementation of byte source.

use crate::source::byte_source::ByteSource;
use memchr::memchr;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// An in-memory byte source that owns its data.
///
/// Never produces read errors, so end of data is always a clean EOF.
pub struct InMemoryByteSource {
    /// The owned byte data being read
    input: Vec<u8>,
    /// Current position in the byte vector
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    ///
    /// # Arguments
    /// * `bytes` - The byte vector to read from
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Creates a new in-memory byte source by copying a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }

    /// Reads an entire file into memory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        let mut contents = Vec::new();
        let mut file = File::open(path)?;
        file.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }

    /// Returns the bytes not yet consumed.
    pub fn remaining(&self) -> &[u8] {
        &self.input[self.pos..]
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    fn read_line_block(&mut self, out: &mut Vec<u8>, max: usize) -> usize {
        let rest = &self.input[self.pos..];
        let window = &rest[..max.min(rest.len())];
        let take = match memchr(b'\n', window) {
            Some(i) => i + 1,
            None => window.len(),
        };
        out.extend_from_slice(&window[..take]);
        self.pos += take;
        take
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&mut self) -> bool {
        self.pos >= self.input.len()
    }
}
