use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::{AttributeFormat, AttributeId};
use crate::{DecodeError, EncodeError};
use alloc::vec::Vec;

/// Every attribute record starts with a 5-byte header.
pub const RECORD_HEADER_LEN: usize = 5;
/// Largest value the write path can describe with its single length byte.
pub const MAX_WRITE_VALUE_LEN: usize = 0xFF;

const READ_ONLY_FLAG: u8 = 0x80;

/// Identifier, format and length of an attribute record, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeHeader {
    pub id: AttributeId,
    pub format: AttributeFormat,
    pub read_only: bool,
    pub length: u16,
}

impl AttributeHeader {
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let available = r.remaining();
        if available < RECORD_HEADER_LEN {
            return Err(DecodeError::TruncatedRecord {
                needed: RECORD_HEADER_LEN,
                available,
            });
        }
        let id = AttributeId::new(r.read_be_u16()?);
        let flags = r.read_u8()?;
        let length = r.read_be_u16()?;
        Ok(Self {
            id,
            format: AttributeFormat::from_u8(flags),
            read_only: flags & READ_ONLY_FLAG != 0,
            length,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let mut flags = self.format.to_u8();
        if self.read_only {
            flags |= READ_ONLY_FLAG;
        }
        w.write_be_u16(self.id.raw())?;
        w.write_u8(flags)?;
        w.write_be_u16(self.length)
    }
}

/// A decoded MAM attribute.
///
/// The value always holds exactly [`length`](Self::length) bytes. Textual
/// values are not NUL-terminated and keep their wire padding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    id: AttributeId,
    format: AttributeFormat,
    read_only: bool,
    value: Vec<u8>,
}

impl Attribute {
    /// Builds an attribute for writing. Values longer than a record's 16-bit
    /// length field are rejected.
    pub fn new(
        id: AttributeId,
        format: AttributeFormat,
        value: impl Into<Vec<u8>>,
    ) -> Result<Self, EncodeError> {
        let value = value.into();
        if value.len() > usize::from(u16::MAX) {
            return Err(EncodeError::ValueTooLarge {
                len: value.len(),
                max: usize::from(u16::MAX),
            });
        }
        Ok(Self {
            id,
            format,
            read_only: false,
            value,
        })
    }

    /// Returns a copy flagged as read-only, as a device would report it.
    pub fn with_read_only(self, read_only: bool) -> Self {
        Self { read_only, ..self }
    }

    pub const fn id(&self) -> AttributeId {
        self.id
    }

    pub const fn format(&self) -> AttributeFormat {
        self.format
    }

    /// Advisory flag reported by the device; writes are not blocked on it.
    pub const fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn length(&self) -> u16 {
        // Bounded by the constructors.
        self.value.len() as u16
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn into_value(self) -> Vec<u8> {
        self.value
    }

    pub fn header(&self) -> AttributeHeader {
        AttributeHeader {
            id: self.id,
            format: self.format,
            read_only: self.read_only,
            length: self.length(),
        }
    }

    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_LEN + self.value.len()
    }

    /// Decodes one record: header, then exactly `length` value bytes.
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let header = AttributeHeader::decode(r)?;
        let available = r.remaining();
        let len = usize::from(header.length);
        if available < len {
            return Err(DecodeError::TruncatedRecord {
                needed: RECORD_HEADER_LEN + len,
                available: RECORD_HEADER_LEN + available,
            });
        }
        let value = r.read_exact(len)?.to_vec();
        Ok(Self {
            id: header.id,
            format: header.format,
            read_only: header.read_only,
            value,
        })
    }

    /// Encodes the record for a WRITE ATTRIBUTE parameter list. The read-only
    /// bit is device-owned and always sent clear. The value is copied
    /// verbatim; fixed-width textual fields must be padded by the caller.
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        if self.value.len() > MAX_WRITE_VALUE_LEN {
            return Err(EncodeError::ValueTooLarge {
                len: self.value.len(),
                max: MAX_WRITE_VALUE_LEN,
            });
        }
        AttributeHeader {
            read_only: false,
            ..self.header()
        }
        .encode(w)?;
        w.write_all(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Attribute, AttributeHeader, MAX_WRITE_VALUE_LEN};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::types::{AttributeFormat, AttributeId};
    use crate::{DecodeError, EncodeError};
    use alloc::vec;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn decode_medium_serial_number() {
        let bytes = [
            0x04, 0x01, 0x81, 0x00, 0x08, b'A', b'B', b'C', b'1', b'2', b'3', b' ', b' ',
        ];
        let mut r = Reader::new(&bytes);
        let attr = Attribute::decode(&mut r).unwrap();
        assert_eq!(attr.id(), AttributeId::new(0x0401));
        assert_eq!(attr.format(), AttributeFormat::Ascii);
        assert!(attr.read_only());
        assert_eq!(attr.length(), 8);
        assert_eq!(attr.value(), b"ABC123  ");
        assert!(r.is_empty());
    }

    #[test]
    fn decode_rejects_short_value() {
        let bytes = [0x04, 0x00, 0x01, 0x00, 0x08, b'L', b'T', b'O'];
        let err = Attribute::decode(&mut Reader::new(&bytes)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedRecord {
                needed: 13,
                available: 8
            }
        );
    }

    #[test]
    fn decode_rejects_short_header() {
        let err = AttributeHeader::decode(&mut Reader::new(&[0x04, 0x00, 0x01])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedRecord {
                needed: 5,
                available: 3
            }
        );
    }

    #[test]
    fn encode_clears_read_only_bit() {
        let attr = Attribute::new(AttributeId::new(0x0806), AttributeFormat::Ascii, *b"TAPE01")
            .unwrap()
            .with_read_only(true);
        let mut buf = [0u8; 16];
        let mut w = Writer::new(&mut buf);
        attr.encode(&mut w).unwrap();
        assert_eq!(&w.as_written()[..5], &[0x08, 0x06, 0x01, 0x00, 0x06]);
        assert_eq!(&w.as_written()[5..], b"TAPE01");
    }

    #[test]
    fn encode_rejects_oversized_value() {
        let attr = Attribute::new(
            AttributeId::new(0x0803),
            AttributeFormat::Text,
            vec![b' '; MAX_WRITE_VALUE_LEN + 1],
        )
        .unwrap();
        let mut buf = [0u8; 512];
        let mut w = Writer::new(&mut buf);
        assert_eq!(
            attr.encode(&mut w).unwrap_err(),
            EncodeError::ValueTooLarge {
                len: 256,
                max: MAX_WRITE_VALUE_LEN
            }
        );
        assert_eq!(w.position(), 0);
    }

    fn any_format() -> impl Strategy<Value = AttributeFormat> {
        prop_oneof![
            Just(AttributeFormat::Binary),
            Just(AttributeFormat::Ascii),
            Just(AttributeFormat::Text),
            Just(AttributeFormat::Reserved),
        ]
    }

    #[test]
    fn reserved_format_roundtrips() {
        let id = AttributeId::new(0x0805);
        let attr = Attribute::new(id, AttributeFormat::Reserved, [0x2Au8]).unwrap();
        let mut buf = [0u8; 6];
        let mut w = Writer::new(&mut buf);
        attr.encode(&mut w).unwrap();
        assert_eq!(buf[2], 0x03);
        assert_eq!(Attribute::decode(&mut Reader::new(&buf)).unwrap(), attr);
    }

    proptest! {
        #[test]
        fn encode_decode_roundtrip(
            id in any::<u16>(),
            format in any_format(),
            value in proptest::collection::vec(any::<u8>(), 0..=MAX_WRITE_VALUE_LEN),
        ) {
            let attr = Attribute::new(AttributeId::new(id), format, value).unwrap();
            let mut buf = vec![0u8; attr.encoded_len()];
            let mut w = Writer::new(&mut buf);
            attr.encode(&mut w).unwrap();
            let decoded = Attribute::decode(&mut Reader::new(&buf)).unwrap();
            prop_assert_eq!(decoded, attr);
        }

        #[test]
        fn decoded_value_matches_length(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            if let Ok(attr) = Attribute::decode(&mut Reader::new(&bytes)) {
                prop_assert_eq!(attr.value().len(), usize::from(attr.length()));
                let value: Vec<u8> = bytes[5..5 + attr.value().len()].to_vec();
                prop_assert_eq!(attr.value(), value.as_slice());
            }
        }
    }
}
