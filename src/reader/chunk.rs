//! Owned, NUL-terminated byte buffer returned by the chunk reader.

use std::fmt;

/// Delimiter byte a chunk ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// NUL byte (`\0`)
    Nul,
    /// Newline (`\n`)
    Newline,
}

// =#========================================================================#=
// CHUNK
// =#========================================================================$=
/// A run of bytes read from a stream, owned by the caller.
///
/// The logical bytes are always followed by one NUL byte that is not part of
/// [len()](Chunk::len), so the buffer can be handed to APIs expecting a
/// NUL-terminated string. A chunk ending on a delimiter includes that
/// delimiter in its logical bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Logical bytes followed by exactly one trailing NUL
    buf: Vec<u8>,
}

impl Chunk {
    /// Wraps logical bytes already followed by the NUL terminator.
    pub(crate) fn from_nul_terminated(buf: Vec<u8>) -> Self {
        debug_assert_eq!(buf.last(), Some(&0));
        Self { buf }
    }

    /// Number of logical bytes, including a delimiter if one was read.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    /// Whether the chunk has no logical bytes.
    ///
    /// Only possible after [trim_newline()](Chunk::trim_newline) on a line
    /// that consisted of a single newline.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The logical bytes, without the trailing NUL terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    /// The logical bytes followed by the NUL terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }

    /// Allocated size of the buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The delimiter the chunk ended on, if any.
    pub fn terminator(&self) -> Option<Terminator> {
        match self.as_bytes().last() {
            Some(0) => Some(Terminator::Nul),
            Some(b'\n') => Some(Terminator::Newline),
            _ => None,
        }
    }

    /// Removes a trailing newline by overwriting it with the NUL terminator.
    ///
    /// The buffer is not reallocated, so it keeps one byte more capacity
    /// than strictly needed.
    ///
    /// # Returns
    /// `true` if a newline was removed
    pub fn trim_newline(&mut self) -> bool {
        if self.terminator() != Some(Terminator::Newline) {
            return false;
        }
        let last = self.len() - 1;
        self.buf[last] = 0;
        self.buf.truncate(last + 1);
        true
    }

    /// Consumes the chunk, returning the logical bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.pop();
        self.buf
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk(\"{}\")", self.as_bytes().escape_ascii())
    }
}
