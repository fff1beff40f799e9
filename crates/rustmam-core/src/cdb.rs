//! The 16-byte command descriptor block carried by every attribute command.

use crate::encoding::primitives::read_be16;
use crate::EncodeError;
use core::fmt;

pub const CDB_LEN: usize = 16;

pub const OP_READ_ATTRIBUTE: u8 = 0x8C;
pub const OP_WRITE_ATTRIBUTE: u8 = 0x8D;

pub const OFFSET_OPCODE: usize = 0;
pub const OFFSET_SERVICE_ACTION: usize = 1;
pub const OFFSET_FIRST_ATTRIBUTE: usize = 8;
pub const OFFSET_LENGTH_LSB: usize = 13;

/// Largest allocation or parameter list length the block can carry.
///
/// The length field spans bytes 10..14 but only its least significant byte
/// is populated, so anything above 255 cannot be requested in one command.
pub const MAX_TRANSFER_LENGTH: u32 = 0xFF;

const SERVICE_ACTION_MASK: u8 = 0x1F;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CommandBlock([u8; CDB_LEN]);

impl CommandBlock {
    pub const fn zeroed() -> Self {
        Self([0; CDB_LEN])
    }

    pub const fn from_bytes(bytes: [u8; CDB_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; CDB_LEN] {
        &self.0
    }

    pub const fn opcode(&self) -> u8 {
        self.0[OFFSET_OPCODE]
    }

    pub const fn service_action(&self) -> u8 {
        self.0[OFFSET_SERVICE_ACTION] & SERVICE_ACTION_MASK
    }

    pub const fn first_attribute(&self) -> u16 {
        read_be16([
            self.0[OFFSET_FIRST_ATTRIBUTE],
            self.0[OFFSET_FIRST_ATTRIBUTE + 1],
        ])
    }

    /// Allocation length (reads) or parameter list length (writes).
    pub const fn transfer_length(&self) -> u8 {
        self.0[OFFSET_LENGTH_LSB]
    }

    pub(crate) fn clear(&mut self) {
        self.0 = [0; CDB_LEN];
    }

    pub(crate) fn set(&mut self, offset: usize, value: u8) {
        self.0[offset] = value;
    }

    pub(crate) fn set_transfer_length(&mut self, len: u32) -> Result<(), EncodeError> {
        if len > MAX_TRANSFER_LENGTH {
            return Err(EncodeError::AllocationLengthTooLarge(len));
        }
        self.0[OFFSET_LENGTH_LSB] = len as u8;
        Ok(())
    }
}

impl Default for CommandBlock {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for CommandBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CommandBlock[")?;
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        f.write_str("]")
    }
}
