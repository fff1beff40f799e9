//! Sense data returned with a CHECK CONDITION status.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenseKey {
    NoSense,
    RecoveredError,
    NotReady,
    MediumError,
    HardwareError,
    IllegalRequest,
    UnitAttention,
    DataProtect,
    BlankCheck,
    VendorSpecific,
    CopyAborted,
    AbortedCommand,
    VolumeOverflow,
    Miscompare,
    Other(u8),
}

impl SenseKey {
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0x0 => Self::NoSense,
            0x1 => Self::RecoveredError,
            0x2 => Self::NotReady,
            0x3 => Self::MediumError,
            0x4 => Self::HardwareError,
            0x5 => Self::IllegalRequest,
            0x6 => Self::UnitAttention,
            0x7 => Self::DataProtect,
            0x8 => Self::BlankCheck,
            0x9 => Self::VendorSpecific,
            0xA => Self::CopyAborted,
            0xB => Self::AbortedCommand,
            0xD => Self::VolumeOverflow,
            0xE => Self::Miscompare,
            v => Self::Other(v),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NoSense => "NO SENSE",
            Self::RecoveredError => "RECOVERED ERROR",
            Self::NotReady => "NOT READY",
            Self::MediumError => "MEDIUM ERROR",
            Self::HardwareError => "HARDWARE ERROR",
            Self::IllegalRequest => "ILLEGAL REQUEST",
            Self::UnitAttention => "UNIT ATTENTION",
            Self::DataProtect => "DATA PROTECT",
            Self::BlankCheck => "BLANK CHECK",
            Self::VendorSpecific => "VENDOR SPECIFIC",
            Self::CopyAborted => "COPY ABORTED",
            Self::AbortedCommand => "ABORTED COMMAND",
            Self::VolumeOverflow => "VOLUME OVERFLOW",
            Self::Miscompare => "MISCOMPARE",
            Self::Other(_) => "RESERVED",
        }
    }

    /// Keys that do not signal a failed command.
    pub const fn is_benign(self) -> bool {
        matches!(self, Self::NoSense | Self::RecoveredError)
    }
}

/// Decoded sense key plus additional sense code and qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sense {
    pub key: SenseKey,
    pub asc: u8,
    pub ascq: u8,
}

impl Sense {
    /// Parses fixed (0x70/0x71) or descriptor (0x72/0x73) format sense data.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let response_code = data.first()? & 0x7F;
        match response_code {
            0x70 | 0x71 => Some(Self {
                key: SenseKey::from_u8(*data.get(2)?),
                asc: data.get(12).copied().unwrap_or(0),
                ascq: data.get(13).copied().unwrap_or(0),
            }),
            0x72 | 0x73 => Some(Self {
                key: SenseKey::from_u8(*data.get(1)?),
                asc: data.get(2).copied().unwrap_or(0),
                ascq: data.get(3).copied().unwrap_or(0),
            }),
            _ => None,
        }
    }

    /// Short description for the codes attribute commands commonly raise.
    pub const fn description(&self) -> Option<&'static str> {
        match (self.asc, self.ascq) {
            (0x04, 0x01) => Some("becoming ready"),
            (0x20, 0x00) => Some("invalid command operation code"),
            (0x24, 0x00) => Some("invalid field in CDB"),
            (0x26, 0x00) => Some("invalid field in parameter list"),
            (0x27, 0x00) => Some("write protected"),
            (0x27, 0x01) => Some("hardware write protected"),
            (0x28, 0x00) => Some("medium may have changed"),
            (0x29, 0x00) => Some("power on or reset occurred"),
            (0x3A, 0x00) => Some("medium not present"),
            (0x55, 0x06) => Some("auxiliary memory out of space"),
            (0x11, 0x12) => Some("auxiliary memory read error"),
            (0x0C, 0x0B) => Some("auxiliary memory write error"),
            _ => None,
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (asc 0x{:02x}, ascq 0x{:02x})",
            self.key.name(),
            self.asc,
            self.ascq
        )?;
        if let Some(desc) = self.description() {
            write!(f, ": {desc}")?;
        }
        Ok(())
    }
}
