//! Big-endian wire integers.
//!
//! All multi-byte fields on the attribute wire are big-endian. These helpers
//! are total: every bit pattern of the right width decodes.

pub const fn read_be16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

pub const fn read_be32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

pub const fn read_be64(bytes: [u8; 8]) -> u64 {
    u64::from_be_bytes(bytes)
}

pub const fn write_be16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

pub const fn write_be32(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

pub const fn write_be64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decodes a big-endian unsigned integer of 1, 2, 4 or 8 bytes.
///
/// Returns `None` for any other width.
pub fn read_be_unsigned(bytes: &[u8]) -> Option<u64> {
    match bytes.len() {
        1 => Some(u64::from(bytes[0])),
        2 => Some(u64::from(read_be16([bytes[0], bytes[1]]))),
        4 => Some(u64::from(read_be32([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ]))),
        8 => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            Some(read_be64(raw))
        }
        _ => None,
    }
}
