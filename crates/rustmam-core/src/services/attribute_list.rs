//! Attribute list responses: a 4-byte length header followed by either
//! 2-byte identifiers or concatenated attribute records.

use crate::encoding::{reader::Reader, writer::Writer};
use crate::types::{Attribute, AttributeId};
use crate::{DecodeError, EncodeError};
use alloc::vec::Vec;

pub const LIST_HEADER_LEN: usize = 4;

const ID_LEN: usize = 2;

/// Reads the header: the number of payload bytes that follow it.
pub fn decode_list_length(r: &mut Reader<'_>) -> Result<u32, DecodeError> {
    r.read_be_u32()
}

fn payload<'a>(r: &mut Reader<'a>, declared: u32) -> Result<&'a [u8], DecodeError> {
    let available = r.remaining();
    let len = usize::try_from(declared).map_err(|_| DecodeError::InvalidValue)?;
    if available < len {
        return Err(DecodeError::TruncatedList {
            declared,
            available,
        });
    }
    r.read_exact(len)
}

/// Identifiers in the order the device returned them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeIdList {
    pub ids: Vec<AttributeId>,
}

impl AttributeIdList {
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let declared = decode_list_length(r)?;
        if declared % 2 != 0 {
            return Err(DecodeError::OddListLength(declared));
        }
        let body = payload(r, declared)?;
        let ids = body
            .chunks_exact(ID_LEN)
            .map(|c| AttributeId::new(u16::from_be_bytes([c[0], c[1]])))
            .collect();
        Ok(Self { ids })
    }

    pub fn encoded_len(&self) -> usize {
        LIST_HEADER_LEN + self.ids.len() * ID_LEN
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_be_u32((self.ids.len() * ID_LEN) as u32)?;
        for id in &self.ids {
            w.write_be_u16(id.raw())?;
        }
        Ok(())
    }
}

/// Full records, as returned for the ATTRIBUTE VALUES service action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeValueList {
    pub attributes: Vec<Attribute>,
}

impl AttributeValueList {
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let declared = decode_list_length(r)?;
        let mut body = Reader::new(payload(r, declared)?);
        let mut attributes = Vec::new();
        while !body.is_empty() {
            attributes.push(Attribute::decode(&mut body)?);
        }
        Ok(Self { attributes })
    }

    pub fn encoded_len(&self) -> usize {
        LIST_HEADER_LEN + self.payload_len()
    }

    fn payload_len(&self) -> usize {
        self.attributes.iter().map(Attribute::encoded_len).sum()
    }

    /// Writes the list without the write-path length ceiling, as a device
    /// would report it.
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_be_u32(self.payload_len() as u32)?;
        for attr in &self.attributes {
            attr.header().encode(w)?;
            w.write_all(attr.value())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeIdList, AttributeValueList};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::types::{Attribute, AttributeFormat, AttributeId};
    use crate::DecodeError;
    use alloc::vec;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn decode_two_ids_in_device_order() {
        let bytes = [0x00, 0x00, 0x00, 0x04, 0x04, 0x00, 0x04, 0x01];
        let list = AttributeIdList::decode(&mut Reader::new(&bytes)).unwrap();
        assert_eq!(
            list.ids,
            vec![AttributeId::new(0x0400), AttributeId::new(0x0401)]
        );
    }

    #[test]
    fn empty_list() {
        let list = AttributeIdList::decode(&mut Reader::new(&[0, 0, 0, 0])).unwrap();
        assert!(list.ids.is_empty());
    }

    #[test]
    fn odd_length_is_rejected() {
        let bytes = [0x00, 0x00, 0x00, 0x03, 0x04, 0x00, 0x04];
        assert_eq!(
            AttributeIdList::decode(&mut Reader::new(&bytes)).unwrap_err(),
            DecodeError::OddListLength(3)
        );
    }

    #[test]
    fn short_payload_is_rejected() {
        let bytes = [0x00, 0x00, 0x00, 0x06, 0x04, 0x00];
        assert_eq!(
            AttributeIdList::decode(&mut Reader::new(&bytes)).unwrap_err(),
            DecodeError::TruncatedList {
                declared: 6,
                available: 2
            }
        );
    }

    #[test]
    fn value_list_decodes_consecutive_records() {
        let bytes = [
            0x00, 0x00, 0x00, 0x0F, // header
            0x00, 0x03, 0x80, 0x00, 0x02, 0x00, 0x2A, // load count (short form)
            0x04, 0x00, 0x81, 0x00, 0x03, b'I', b'B', b'M',
        ];
        let list = AttributeValueList::decode(&mut Reader::new(&bytes)).unwrap();
        assert_eq!(list.attributes.len(), 2);
        assert_eq!(list.attributes[0].value(), &[0x00, 0x2A]);
        assert!(list.attributes[1].read_only());
        assert_eq!(list.attributes[1].format(), AttributeFormat::Ascii);
    }

    #[test]
    fn value_list_roundtrip_keeps_read_only() {
        let list = AttributeValueList {
            attributes: vec![
                Attribute::new(AttributeId::new(0x0002), AttributeFormat::Binary, [0u8; 8])
                    .unwrap()
                    .with_read_only(true),
                Attribute::new(AttributeId::new(0x0806), AttributeFormat::Ascii, *b"A1").unwrap(),
            ],
        };
        let mut buf = vec![0u8; list.encoded_len()];
        let mut w = Writer::new(&mut buf);
        list.encode(&mut w).unwrap();
        assert_eq!(
            AttributeValueList::decode(&mut Reader::new(&buf)).unwrap(),
            list
        );
    }

    proptest! {
        #[test]
        fn id_list_decode_is_deterministic(ids in proptest::collection::vec(any::<u16>(), 0..64)) {
            let list = AttributeIdList { ids: ids.iter().copied().map(AttributeId::new).collect() };
            let mut buf = vec![0u8; list.encoded_len()];
            let mut w = Writer::new(&mut buf);
            list.encode(&mut w).unwrap();

            let first = AttributeIdList::decode(&mut Reader::new(&buf)).unwrap();
            let second = AttributeIdList::decode(&mut Reader::new(&buf)).unwrap();
            prop_assert_eq!(&first, &second);
            let raw: Vec<u16> = first.ids.iter().map(|id| id.raw()).collect();
            prop_assert_eq!(raw, ids);
        }

        #[test]
        fn odd_declared_length_always_fails(
            half in 0u32..1000,
            tail in proptest::collection::vec(any::<u8>(), 0..32),
        ) {
            let declared = half * 2 + 1;
            let mut buf = declared.to_be_bytes().to_vec();
            buf.extend_from_slice(&tail);
            prop_assert_eq!(
                AttributeIdList::decode(&mut Reader::new(&buf)).unwrap_err(),
                DecodeError::OddListLength(declared)
            );
        }
    }
}
