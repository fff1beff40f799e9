//! In-memory device holding a MAM.
//!
//! [`SimulatedMam`] answers READ ATTRIBUTE and WRITE ATTRIBUTE commands the
//! way a drive with a loaded cartridge would. Useful for testing and
//! development without a tape drive.

use rustmam_core::cdb::{CommandBlock, OP_READ_ATTRIBUTE, OP_WRITE_ATTRIBUTE};
use rustmam_core::encoding::{reader::Reader, writer::Writer};
use rustmam_core::services::attribute_list::{AttributeIdList, AttributeValueList};
use rustmam_core::services::read_attribute::ReadAttributeService;
use rustmam_core::types::definition::ATTRIBUTE_DEFINITIONS;
use rustmam_core::types::{Attribute, AttributeFormat, AttributeId};
use rustmam_core::EncodeError;
use rustmam_transport::{DeviceAddress, Direction, Sense, SenseKey, Transport, TransportError};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

const ASC_INVALID_OPCODE: u8 = 0x20;
const ASC_INVALID_FIELD_IN_CDB: u8 = 0x24;
const ASC_INVALID_PARAMETER_FIELD: u8 = 0x26;
const ASC_AUX_MEMORY_READ_ERROR: (u8, u8) = (0x11, 0x12);

/// A simulated drive with a cartridge loaded.
#[derive(Debug, Clone)]
pub struct SimulatedMam {
    attributes: BTreeMap<AttributeId, Attribute>,
    supported: Vec<AttributeId>,
    failing: BTreeSet<AttributeId>,
    address: DeviceAddress,
    commands: Vec<(Direction, CommandBlock)>,
}

impl Default for SimulatedMam {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedMam {
    /// An empty MAM that claims support for every attribute in the
    /// definition table.
    pub fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
            supported: ATTRIBUTE_DEFINITIONS.iter().map(|d| d.id).collect(),
            failing: BTreeSet::new(),
            address: DeviceAddress::Scsi {
                bus: 0,
                target: 0,
                lun: 0,
            },
            commands: Vec::new(),
        }
    }

    /// A cartridge with the attributes a freshly labelled LTO tape carries.
    pub fn lto_cartridge() -> Self {
        use AttributeFormat::{Ascii, Binary};

        let mut sim = Self::new();
        let device = |id: u16, format, value: &[u8]| {
            Attribute::new(AttributeId::new(id), format, value.to_vec())
                .map(|a| a.with_read_only(true))
        };
        let attrs = [
            device(0x0000, Binary, &[0, 0, 0, 0, 0, 0x16, 0x80, 0x00]),
            device(0x0001, Binary, &[0, 0, 0, 0, 0, 0x16, 0xE3, 0x60]),
            device(0x0003, Binary, &[0, 0, 0, 0, 0, 0, 0, 12]),
            device(0x0400, Ascii, b"IBM     "),
            device(0x0401, Ascii, b"A0B1C2D3E4F5G6H7I8J9K0L1M2N3O4P5"),
            device(0x0406, Ascii, b"20230115"),
            device(0x0408, Binary, &[0x58]),
            Attribute::new(AttributeId::new(0x0806), Ascii, b"VOL001L5".to_vec()),
        ];
        for attr in attrs.into_iter().flatten() {
            sim.insert(attr);
        }
        sim
    }

    pub fn with_address(mut self, address: DeviceAddress) -> Self {
        self.address = address;
        self
    }

    pub fn with_supported(mut self, supported: Vec<AttributeId>) -> Self {
        self.supported = supported;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.insert(attribute);
        self
    }

    /// Adds or replaces an attribute, keeping its read-only flag.
    pub fn insert(&mut self, attribute: Attribute) {
        self.attributes.insert(attribute.id(), attribute);
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(&id)
    }

    /// Makes every ATTRIBUTE VALUES read starting at `id` fail with a
    /// medium error.
    pub fn fail_reads_of(&mut self, id: AttributeId) {
        self.failing.insert(id);
    }

    /// Every command received so far, in order.
    pub fn commands(&self) -> &[(Direction, CommandBlock)] {
        &self.commands
    }

    fn handle_read(&self, cdb: &CommandBlock) -> Result<Vec<u8>, Sense> {
        let first = AttributeId::new(cdb.first_attribute());
        match ReadAttributeService::from_u8(cdb.service_action()) {
            Some(ReadAttributeService::AttributeValues) => {
                if self.failing.contains(&first) {
                    let (asc, ascq) = ASC_AUX_MEMORY_READ_ERROR;
                    return Err(sense(SenseKey::MediumError, asc, ascq));
                }
                let attributes = self.attributes.range(first..).map(|(_, a)| a);
                let list = AttributeValueList {
                    attributes: attributes.cloned().collect(),
                };
                if list.attributes.is_empty() {
                    return Err(sense(SenseKey::IllegalRequest, ASC_INVALID_FIELD_IN_CDB, 0));
                }
                encode_response(list.encoded_len(), |w| list.encode(w))
            }
            Some(ReadAttributeService::AttributeList) => {
                let list = AttributeIdList {
                    ids: self.attributes.keys().copied().collect(),
                };
                encode_response(list.encoded_len(), |w| list.encode(w))
            }
            Some(ReadAttributeService::SupportedAttributes) => {
                let list = AttributeIdList {
                    ids: self.supported.clone(),
                };
                encode_response(list.encoded_len(), |w| list.encode(w))
            }
            None => Err(sense(SenseKey::IllegalRequest, ASC_INVALID_FIELD_IN_CDB, 0)),
        }
    }

    fn handle_write(&mut self, params: &[u8]) -> Result<(), Sense> {
        let invalid = || sense(SenseKey::IllegalRequest, ASC_INVALID_PARAMETER_FIELD, 0);
        let list = AttributeValueList::decode(&mut Reader::new(params)).map_err(|e| {
            log::debug!("simulator: bad parameter list: {e}");
            invalid()
        })?;
        // Validate everything before applying anything.
        for attr in &list.attributes {
            let existing_ro = self
                .attributes
                .get(&attr.id())
                .is_some_and(Attribute::read_only);
            if existing_ro || !attr.id().namespace().is_host_writable() {
                log::debug!("simulator: attribute {} is not writable", attr.id());
                return Err(invalid());
            }
        }
        for attr in list.attributes {
            if attr.length() == 0 {
                self.attributes.remove(&attr.id());
            } else {
                let attr = attr.with_read_only(false);
                self.attributes.insert(attr.id(), attr);
            }
        }
        Ok(())
    }
}

impl Transport for SimulatedMam {
    fn issue_command(
        &mut self,
        direction: Direction,
        cdb: &CommandBlock,
        buf: &mut [u8],
        _timeout: Duration,
    ) -> Result<usize, TransportError> {
        self.commands.push((direction, *cdb));
        let result = match (cdb.opcode(), direction) {
            (OP_READ_ATTRIBUTE, Direction::Read) => self.handle_read(cdb).map(|response| {
                let n = response
                    .len()
                    .min(usize::from(cdb.transfer_length()))
                    .min(buf.len());
                buf[..n].copy_from_slice(&response[..n]);
                n
            }),
            (OP_WRITE_ATTRIBUTE, Direction::Write) => {
                let n = usize::from(cdb.transfer_length()).min(buf.len());
                self.handle_write(&buf[..n]).map(|()| n)
            }
            _ => Err(sense(SenseKey::IllegalRequest, ASC_INVALID_OPCODE, 0)),
        };
        result.map_err(TransportError::CheckCondition)
    }

    fn identify(&mut self) -> Result<DeviceAddress, TransportError> {
        Ok(self.address)
    }
}

const fn sense(key: SenseKey, asc: u8, ascq: u8) -> Sense {
    Sense { key, asc, ascq }
}

fn encode_response(
    len: usize,
    encode: impl FnOnce(&mut Writer<'_>) -> Result<(), EncodeError>,
) -> Result<Vec<u8>, Sense> {
    let mut out = vec![0u8; len];
    let mut w = Writer::new(&mut out);
    encode(&mut w).map_err(|e| {
        log::warn!("simulator: cannot encode response: {e}");
        sense(SenseKey::HardwareError, 0x44, 0)
    })?;
    Ok(out)
}
