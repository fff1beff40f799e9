use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall,
    /// Attribute value longer than the single length byte can describe.
    ValueTooLarge {
        len: usize,
        max: usize,
    },
    /// Allocation or parameter list length above the 8-bit command block field.
    AllocationLengthTooLarge(u32),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::ValueTooLarge { len, max } => {
                write!(f, "attribute value of {len} bytes exceeds {max} bytes")
            }
            Self::AllocationLengthTooLarge(len) => {
                write!(f, "allocation length {len} exceeds 255 bytes")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    UnexpectedEof,
    /// Buffer ends before the record header or its declared value does.
    TruncatedRecord {
        needed: usize,
        available: usize,
    },
    /// ID list payload length is not a whole number of 2-byte ids.
    OddListLength(u32),
    /// List header declares more payload bytes than the buffer holds.
    TruncatedList {
        declared: u32,
        available: usize,
    },
    InvalidValue,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::TruncatedRecord { needed, available } => write!(
                f,
                "truncated attribute record: {needed} bytes needed, {available} available"
            ),
            Self::OddListLength(len) => write!(f, "attribute list length {len} is odd"),
            Self::TruncatedList {
                declared,
                available,
            } => write!(
                f,
                "truncated attribute list: {declared} bytes declared, {available} available"
            ),
            Self::InvalidValue => f.write_str("invalid value"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::{DecodeError, EncodeError};
    use alloc::string::ToString;

    #[test]
    fn every_variant_has_a_message() {
        let encode = [
            EncodeError::BufferTooSmall,
            EncodeError::ValueTooLarge { len: 300, max: 255 },
            EncodeError::AllocationLengthTooLarge(260),
        ];
        for e in encode {
            let text = match e {
                EncodeError::BufferTooSmall
                | EncodeError::ValueTooLarge { .. }
                | EncodeError::AllocationLengthTooLarge(_) => e.to_string(),
            };
            assert!(!text.is_empty());
        }
        assert_eq!(
            DecodeError::OddListLength(3).to_string(),
            "attribute list length 3 is odd"
        );
        assert_eq!(
            EncodeError::AllocationLengthTooLarge(260).to_string(),
            "allocation length 260 exceeds 255 bytes"
        );
    }
}
