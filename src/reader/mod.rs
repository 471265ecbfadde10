//! Chunk and line reading on top of a [ByteSource](crate::source::ByteSource).
pub mod chunk;
pub mod chunk_reader;
pub mod read_error;

pub use chunk::{Chunk, Terminator};
pub use chunk_reader::{
    ChunkReader, ChunkReaderBuilder, DelimiterMode, IoErrorPolicy, ReadStrategy,
};
pub use read_error::{ReadError, ReadErrorKind};
