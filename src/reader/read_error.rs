//! Error types for chunk reading.
//!
//! This module provides [ReadError] and [ReadErrorKind] for reporting
//! failures while reading a chunk from a [ByteSource].

use crate::source::ByteSource;
use std::io;
use thiserror::Error;

// =#========================================================================#=
// READ ERROR KIND
// =#========================================================================€=
/// Error kinds that can occur while reading a chunk.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum ReadErrorKind {
    /// Growing the chunk buffer failed.
    #[error("allocation of {requested} additional bytes failed")]
    AllocationFailed { requested: usize },

    /// The underlying stream reported a read error
    /// (only surfaced with [IoErrorPolicy::Report](crate::reader::IoErrorPolicy::Report)).
    #[error("IO error - {0}")]
    Io(io::ErrorKind),
}

// =#========================================================================#=
// READ ERROR
// =#========================================================================$=
/// Read error with the source position at which it occurred.
#[derive(Error, Debug)]
#[error("{kind} at position {position}")]
pub struct ReadError {
    kind: ReadErrorKind,
    position: usize,
    #[source]
    source: Option<io::Error>,
}

impl ReadError {
    /// Create a ReadError from an error kind and source state
    pub fn from_source<S: ByteSource + ?Sized>(kind: ReadErrorKind, source: &S) -> Self {
        Self {
            kind,
            position: source.position(),
            source: None,
        }
    }

    /// Convenience constructor for AllocationFailed
    pub fn allocation_failed<S: ByteSource + ?Sized>(requested: usize, source: &S) -> Self {
        Self::from_source(ReadErrorKind::AllocationFailed { requested }, source)
    }

    /// Convenience constructor for Io, keeping the underlying error
    pub fn io<S: ByteSource + ?Sized>(err: io::Error, source: &S) -> Self {
        Self {
            kind: ReadErrorKind::Io(err.kind()),
            position: source.position(),
            source: Some(err),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ReadErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError {
            kind: ReadErrorKind::Io(err.kind()),
            position: 0, // No position without a source
            source: Some(err),
        }
    }
}
