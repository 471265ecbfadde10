//! Byte sources the chunk reader consumes.
pub mod byte_source;
pub mod in_memory_byte_source;
pub mod reader_byte_source;

pub use byte_source::ByteSource;
pub use in_memory_byte_source::InMemoryByteSource;
pub use reader_byte_source::ReaderByteSource;
