use crate::cdb::{
    CommandBlock, OFFSET_FIRST_ATTRIBUTE, OFFSET_OPCODE, OFFSET_SERVICE_ACTION, OP_READ_ATTRIBUTE,
};
use crate::encoding::primitives::write_be16;
use crate::services::attribute_list::LIST_HEADER_LEN;
use crate::types::attribute::RECORD_HEADER_LEN;
use crate::types::AttributeId;
use crate::EncodeError;

pub const SERVICE_ATTRIBUTE_VALUES: u8 = 0x00;
pub const SERVICE_ATTRIBUTE_LIST: u8 = 0x01;
pub const SERVICE_SUPPORTED_ATTRIBUTES: u8 = 0x05;

/// List header plus one record header: enough to learn a value's length.
pub const HEAD_ONLY_LEN: usize = LIST_HEADER_LEN + RECORD_HEADER_LEN;

/// READ ATTRIBUTE service actions used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAttributeService {
    /// Records starting at the first attribute identifier.
    AttributeValues,
    /// Identifiers of attributes present on the medium.
    AttributeList,
    /// Identifiers the device supports.
    SupportedAttributes,
}

impl ReadAttributeService {
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::AttributeValues => SERVICE_ATTRIBUTE_VALUES,
            Self::AttributeList => SERVICE_ATTRIBUTE_LIST,
            Self::SupportedAttributes => SERVICE_SUPPORTED_ATTRIBUTES,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            SERVICE_ATTRIBUTE_VALUES => Some(Self::AttributeValues),
            SERVICE_ATTRIBUTE_LIST => Some(Self::AttributeList),
            SERVICE_SUPPORTED_ATTRIBUTES => Some(Self::SupportedAttributes),
            _ => None,
        }
    }
}

/// Which identifier list to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeListMode {
    /// Attributes currently stored on the medium.
    Available,
    /// Attributes the device knows how to handle.
    Supported,
}

impl AttributeListMode {
    pub const fn service(self) -> ReadAttributeService {
        match self {
            Self::Available => ReadAttributeService::AttributeList,
            Self::Supported => ReadAttributeService::SupportedAttributes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadAttributeRequest {
    pub service: ReadAttributeService,
    pub first_attribute: AttributeId,
    pub allocation_length: u32,
}

impl ReadAttributeRequest {
    /// Reads the record of a single attribute.
    pub const fn attribute(id: AttributeId, allocation_length: u32) -> Self {
        Self {
            service: ReadAttributeService::AttributeValues,
            first_attribute: id,
            allocation_length,
        }
    }

    /// Reads an identifier list.
    pub const fn list(mode: AttributeListMode, allocation_length: u32) -> Self {
        Self {
            service: mode.service(),
            first_attribute: AttributeId::new(0),
            allocation_length,
        }
    }

    pub fn encode(&self) -> Result<CommandBlock, EncodeError> {
        let mut cdb = CommandBlock::zeroed();
        self.encode_into(&mut cdb)?;
        Ok(cdb)
    }

    /// Overwrites every byte of `cdb`.
    pub fn encode_into(&self, cdb: &mut CommandBlock) -> Result<(), EncodeError> {
        cdb.clear();
        cdb.set(OFFSET_OPCODE, OP_READ_ATTRIBUTE);
        cdb.set(OFFSET_SERVICE_ACTION, self.service.to_u8());
        if self.service == ReadAttributeService::AttributeValues {
            let [msb, lsb] = write_be16(self.first_attribute.raw());
            cdb.set(OFFSET_FIRST_ATTRIBUTE, msb);
            cdb.set(OFFSET_FIRST_ATTRIBUTE + 1, lsb);
        }
        cdb.set_transfer_length(self.allocation_length)
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeListMode, ReadAttributeRequest, ReadAttributeService, HEAD_ONLY_LEN};
    use crate::cdb::{CommandBlock, OP_READ_ATTRIBUTE};
    use crate::types::AttributeId;
    use crate::EncodeError;

    #[test]
    fn single_attribute_block() {
        let cdb = ReadAttributeRequest::attribute(AttributeId::new(0x0400), HEAD_ONLY_LEN as u32)
            .encode()
            .unwrap();
        let mut expected = [0u8; 16];
        expected[0] = OP_READ_ATTRIBUTE;
        expected[8] = 0x04;
        expected[13] = 9;
        assert_eq!(cdb.as_bytes(), &expected);
    }

    #[test]
    fn list_blocks_carry_service_action() {
        let available = ReadAttributeRequest::list(AttributeListMode::Available, 4)
            .encode()
            .unwrap();
        assert_eq!(available.service_action(), 0x01);
        assert_eq!(available.first_attribute(), 0);
        assert_eq!(available.transfer_length(), 4);

        let supported = ReadAttributeRequest::list(AttributeListMode::Supported, 200)
            .encode()
            .unwrap();
        assert_eq!(supported.service_action(), 0x05);
        assert_eq!(supported.transfer_length(), 200);
        assert_eq!(
            ReadAttributeService::from_u8(supported.service_action()),
            Some(ReadAttributeService::SupportedAttributes)
        );
    }

    #[test]
    fn encode_into_reinitializes_block() {
        let mut cdb = CommandBlock::from_bytes([0xAA; 16]);
        ReadAttributeRequest::list(AttributeListMode::Available, 4)
            .encode_into(&mut cdb)
            .unwrap();
        let bytes = cdb.as_bytes();
        assert_eq!(bytes[0], OP_READ_ATTRIBUTE);
        assert_eq!(bytes[1], 0x01);
        assert_eq!(bytes[13], 4);
        for (i, b) in bytes.iter().enumerate() {
            if ![0, 1, 13].contains(&i) {
                assert_eq!(*b, 0, "byte {i} not cleared");
            }
        }
    }

    #[test]
    fn allocation_length_above_ceiling_is_rejected() {
        let err = ReadAttributeRequest::attribute(AttributeId::new(0x0803), 9 + 160 + 100)
            .encode()
            .unwrap_err();
        assert_eq!(err, EncodeError::AllocationLengthTooLarge(269));
    }
}
