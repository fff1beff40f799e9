/// Fixed-width big-endian integer helpers.
pub mod primitives;
/// Bounds-checked byte reader for decoding device responses.
pub mod reader;
/// Byte writer for encoding requests into a caller-owned buffer.
pub mod writer;
