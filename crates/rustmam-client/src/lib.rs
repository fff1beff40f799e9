pub mod client;
pub mod dump;
pub mod error;
pub mod simulator;

pub use client::MamClient;
pub use dump::{DumpFailure, DumpReport};
pub use error::ClientError;
pub use rustmam_core::services::read_attribute::AttributeListMode;
pub use rustmam_core::types::{Attribute, AttributeFormat, AttributeId};
pub use rustmam_transport::{DeviceAddress, Transport, TransportError};
pub use simulator::SimulatedMam;
