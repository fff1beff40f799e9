use core::fmt;

/// A 16-bit MAM attribute identifier.
///
/// Identifiers are not validated against the definition table; any value the
/// device reports is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeId(u16);

impl AttributeId {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Which party the identifier range belongs to.
    pub const fn namespace(self) -> AttributeNamespace {
        match self.0 {
            0x0000..=0x03FF => AttributeNamespace::Device,
            0x0400..=0x07FF => AttributeNamespace::Medium,
            0x0800..=0x0BFF => AttributeNamespace::Host,
            0x0C00..=0x0FFF => AttributeNamespace::DeviceVendor,
            0x1000..=0x13FF => AttributeNamespace::MediumVendor,
            0x1400..=0x17FF => AttributeNamespace::HostVendor,
            _ => AttributeNamespace::Reserved,
        }
    }
}

impl From<u16> for AttributeId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Identifier ranges as partitioned by the attribute command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeNamespace {
    /// Maintained by the drive.
    Device,
    /// Set when the cartridge is manufactured.
    Medium,
    /// Written by host applications.
    Host,
    DeviceVendor,
    MediumVendor,
    HostVendor,
    Reserved,
}

impl AttributeNamespace {
    /// Whether a host is expected to be able to write attributes in this range.
    pub const fn is_host_writable(self) -> bool {
        matches!(self, Self::Host | Self::HostVendor)
    }
}
