use crate::cdb::{CommandBlock, OFFSET_OPCODE, OP_WRITE_ATTRIBUTE};
use crate::encoding::writer::Writer;
use crate::types::attribute::MAX_WRITE_VALUE_LEN;
use crate::types::Attribute;
use crate::EncodeError;
use alloc::vec;
use alloc::vec::Vec;

/// The parameter list opens with a 4-byte PARAMETER DATA LENGTH.
pub const PARAMETER_HEADER_LEN: usize = 4;

/// WRITE ATTRIBUTE carrying a single attribute record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteAttributeRequest<'a> {
    pub attribute: &'a Attribute,
}

impl<'a> WriteAttributeRequest<'a> {
    pub const fn new(attribute: &'a Attribute) -> Self {
        Self { attribute }
    }

    pub fn parameter_list_len(&self) -> usize {
        PARAMETER_HEADER_LEN + self.attribute.encoded_len()
    }

    /// Builds the command block and the parameter list it announces.
    ///
    /// Oversized values fail with [`EncodeError::ValueTooLarge`] before any
    /// bytes are produced.
    pub fn encode(&self) -> Result<(CommandBlock, Vec<u8>), EncodeError> {
        let value_len = self.attribute.value().len();
        if value_len > MAX_WRITE_VALUE_LEN {
            return Err(EncodeError::ValueTooLarge {
                len: value_len,
                max: MAX_WRITE_VALUE_LEN,
            });
        }
        let list_len = self.parameter_list_len();
        let cdb = Self::command_block(list_len as u32)?;

        let mut params = vec![0u8; list_len];
        let mut w = Writer::new(&mut params);
        self.encode_parameter_list(&mut w)?;
        Ok((cdb, params))
    }

    pub fn encode_parameter_list(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_be_u32(self.attribute.encoded_len() as u32)?;
        self.attribute.encode(w)
    }

    pub fn command_block(parameter_list_len: u32) -> Result<CommandBlock, EncodeError> {
        let mut cdb = CommandBlock::zeroed();
        cdb.set(OFFSET_OPCODE, OP_WRITE_ATTRIBUTE);
        cdb.set_transfer_length(parameter_list_len)?;
        Ok(cdb)
    }
}
