//! Bulk dump: list the attributes present on the medium, then fetch each one.

use crate::{ClientError, MamClient};
use rustmam_core::services::read_attribute::AttributeListMode;
use rustmam_core::types::{Attribute, AttributeId};
use rustmam_transport::Transport;

/// An attribute that could not be fetched during a collecting dump.
#[derive(Debug)]
pub struct DumpFailure {
    pub id: AttributeId,
    pub error: ClientError,
}

/// Result of a dump that keeps going past per-attribute errors.
#[derive(Debug, Default)]
pub struct DumpReport {
    pub attributes: Vec<Attribute>,
    pub failures: Vec<DumpFailure>,
}

impl DumpReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<T: Transport> MamClient<T> {
    /// Fetches every available attribute in list order, stopping at the first
    /// error.
    pub fn dump_all(&mut self) -> Result<Vec<Attribute>, ClientError> {
        let ids = self.fetch_attribute_ids(AttributeListMode::Available)?;
        let mut attributes = Vec::with_capacity(ids.len());
        for id in ids {
            attributes.push(self.fetch_attribute(id)?);
        }
        Ok(attributes)
    }

    /// Like [`dump_all`](Self::dump_all) but records per-attribute errors and
    /// carries on. Failing to read the list itself is still an error.
    pub fn dump_all_collecting(&mut self) -> Result<DumpReport, ClientError> {
        let ids = self.fetch_attribute_ids(AttributeListMode::Available)?;
        let mut report = DumpReport {
            attributes: Vec::with_capacity(ids.len()),
            failures: Vec::new(),
        };
        for id in ids {
            match self.fetch_attribute(id) {
                Ok(attr) => report.attributes.push(attr),
                Err(error) => {
                    log::warn!("attribute {id}: {error}");
                    report.failures.push(DumpFailure { id, error });
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientError, MamClient, SimulatedMam};
    use rustmam_core::types::{Attribute, AttributeFormat, AttributeId};
    use rustmam_transport::TransportError;

    fn attr(raw: u16, format: AttributeFormat, value: &[u8]) -> Attribute {
        Attribute::new(AttributeId::new(raw), format, value.to_vec()).unwrap()
    }

    fn device() -> SimulatedMam {
        let mut sim = SimulatedMam::new();
        let load_count = attr(0x0003, AttributeFormat::Binary, &[0, 0, 0, 0, 0, 0, 0, 7]);
        let vendor = attr(0x0400, AttributeFormat::Ascii, b"IBM     ");
        sim.insert(load_count.with_read_only(true));
        sim.insert(vendor.with_read_only(true));
        sim.insert(attr(0x0806, AttributeFormat::Ascii, b"VOL001L5"));
        sim
    }

    #[test]
    fn dump_returns_attributes_in_list_order() {
        let mut client = MamClient::new(device());
        let attrs = client.dump_all().unwrap();
        let ids: Vec<u16> = attrs.iter().map(|a| a.id().raw()).collect();
        assert_eq!(ids, vec![0x0003, 0x0400, 0x0806]);
        assert_eq!(attrs[1].value(), b"IBM     ");
    }

    #[test]
    fn dump_stops_on_first_error() {
        let mut sim = device();
        sim.fail_reads_of(AttributeId::new(0x0400));
        let mut client = MamClient::new(sim);
        let err = client.dump_all().unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(TransportError::CheckCondition(_))
        ));
        // list (2) + 0x0003 (2) + failed head read of 0x0400 (1)
        assert_eq!(client.transport().commands().len(), 5);
    }

    #[test]
    fn collecting_dump_keeps_going() {
        let mut sim = device();
        sim.fail_reads_of(AttributeId::new(0x0400));
        let mut client = MamClient::new(sim);
        let report = client.dump_all_collecting().unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.attributes.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, AttributeId::new(0x0400));
    }
}
