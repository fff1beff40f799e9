use core::fmt;

/// Bus position reported when identifying a device. Passed through for
/// display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceAddress {
    Scsi { bus: u32, target: u32, lun: u32 },
    Atapi { bus: u32, drive: u32 },
}

impl DeviceAddress {
    /// Unpacks the `SCSI_IOCTL_GET_IDLUN` word: target, lun, channel and host
    /// number, one byte each from the least significant end.
    pub const fn from_idlun(four_in_one: u32, bus: u32) -> Self {
        Self::Scsi {
            bus,
            target: four_in_one & 0xFF,
            lun: (four_in_one >> 8) & 0xFF,
        }
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scsi { bus, target, lun } => {
                write!(f, "SCSI   busnum = {bus}, target = {target}, lun = {lun}")
            }
            Self::Atapi { bus, drive } => write!(f, "ATAPI  busnum = {bus}, drive = {drive}"),
        }
    }
}
