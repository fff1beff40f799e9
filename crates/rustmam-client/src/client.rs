use crate::ClientError;
use rustmam_core::encoding::reader::Reader;
use rustmam_core::services::attribute_list::{decode_list_length, AttributeIdList, LIST_HEADER_LEN};
use rustmam_core::services::read_attribute::{
    AttributeListMode, ReadAttributeRequest, HEAD_ONLY_LEN,
};
use rustmam_core::services::write_attribute::WriteAttributeRequest;
use rustmam_core::types::{Attribute, AttributeHeader, AttributeId};
use rustmam_transport::{DeviceAddress, Direction, Transport, DEFAULT_COMMAND_TIMEOUT};
use std::time::Duration;

/// Reads and writes MAM attributes over a [`Transport`].
///
/// Variable-length data is fetched in two round trips: the first asks for the
/// headers only to learn the length, the second asks for exactly that much.
/// Nothing is cached between calls.
#[derive(Debug)]
pub struct MamClient<T: Transport> {
    transport: T,
    command_timeout: Duration,
}

impl<T: Transport> MamClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    pub fn identify(&mut self) -> Result<DeviceAddress, ClientError> {
        Ok(self.transport.identify()?)
    }

    /// Fetches one attribute by identifier.
    ///
    /// Fails with [`ClientError::IdentityMismatch`] when the device answers
    /// with a different attribute, which it does when `id` is absent but a
    /// higher identifier exists.
    pub fn fetch_attribute(&mut self, id: AttributeId) -> Result<Attribute, ClientError> {
        let head = self.read(ReadAttributeRequest::attribute(id, HEAD_ONLY_LEN as u32))?;
        let mut r = Reader::new(&head);
        r.skip(LIST_HEADER_LEN)?;
        let header = AttributeHeader::decode(&mut r)?;
        log::debug!("attribute {id}: {} value bytes declared", header.length);

        let full_len = HEAD_ONLY_LEN as u32 + u32::from(header.length);
        let full = self.read(ReadAttributeRequest::attribute(id, full_len))?;
        let mut r = Reader::new(&full);
        r.skip(LIST_HEADER_LEN)?;
        let attribute = Attribute::decode(&mut r)?;

        if attribute.id() != id {
            return Err(ClientError::IdentityMismatch {
                requested: id,
                returned: attribute.id(),
            });
        }
        Ok(attribute)
    }

    /// Lists attribute identifiers in the order the device reports them.
    pub fn fetch_attribute_ids(
        &mut self,
        mode: AttributeListMode,
    ) -> Result<Vec<AttributeId>, ClientError> {
        let head = self.read(ReadAttributeRequest::list(mode, LIST_HEADER_LEN as u32))?;
        let total = decode_list_length(&mut Reader::new(&head))?;
        log::debug!("{mode:?} attribute list: {total} bytes declared");

        let full_len = (LIST_HEADER_LEN as u32).saturating_add(total);
        let full = self.read(ReadAttributeRequest::list(mode, full_len))?;
        let list = AttributeIdList::decode(&mut Reader::new(&full))?;
        Ok(list.ids)
    }

    /// Writes one attribute in a single command. The read-only flag is not
    /// checked here; the device decides.
    pub fn write_attribute(&mut self, attribute: &Attribute) -> Result<(), ClientError> {
        let (cdb, mut params) = WriteAttributeRequest::new(attribute).encode()?;
        if attribute.read_only() {
            log::debug!("writing attribute {} flagged read-only", attribute.id());
        }
        log::debug!("write {cdb:?}");
        log::trace!("parameter list {params:02x?}");
        self.transport
            .issue_command(Direction::Write, &cdb, &mut params, self.command_timeout)?;
        Ok(())
    }

    fn read(&mut self, request: ReadAttributeRequest) -> Result<Vec<u8>, ClientError> {
        let cdb = request.encode()?;
        let mut buf = alloc_buffer(request.allocation_length as usize)?;
        log::debug!("read {cdb:?}");
        let n = self
            .transport
            .issue_command(Direction::Read, &cdb, &mut buf, self.command_timeout)?;
        buf.truncate(n);
        log::trace!("response {buf:02x?}");
        Ok(buf)
    }
}

fn alloc_buffer(len: usize) -> Result<Vec<u8>, ClientError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ClientError::AllocationFailure { len })?;
    buf.resize(len, 0);
    Ok(buf)
}
