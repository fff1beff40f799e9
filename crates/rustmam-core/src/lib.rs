//! Tape Medium Auxiliary Memory (MAM) attribute protocol in pure Rust.
//!
//! `rustmam-core` builds READ ATTRIBUTE / WRITE ATTRIBUTE command blocks,
//! decodes and encodes attribute records and attribute lists, and carries the
//! static table of well-known attribute definitions used for display. It does
//! no I/O; the rustmam transport and client crates issue the commands.
//!
//! # Feature flags
//!
//! - **`std`** (default): enables `std::error::Error` implementations.
//! - **`serde`**: derives `Serialize` on core types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Fixed 16-byte command block and its field offsets.
pub mod cdb;
/// Big-endian primitives and the bounds-checked reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// Display rendering of attribute values.
pub mod render;
/// READ ATTRIBUTE / WRITE ATTRIBUTE request builders and list codecs.
pub mod services;
/// Attribute identifiers, formats, records and the definition table.
pub mod types;

pub use error::{DecodeError, EncodeError};
