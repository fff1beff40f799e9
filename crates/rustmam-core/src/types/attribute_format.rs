/// The FORMAT field of an attribute record header.
///
/// Only the low two bits of the format byte carry the format. Code 3 is
/// reserved and kept as [`Reserved`](Self::Reserved) so callers can tell it
/// apart from the defined formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeFormat {
    Binary,
    Ascii,
    Text,
    Reserved,
}

impl AttributeFormat {
    pub const MASK: u8 = 0x03;

    pub const fn from_u8(value: u8) -> Self {
        match value & Self::MASK {
            0 => Self::Binary,
            1 => Self::Ascii,
            2 => Self::Text,
            _ => Self::Reserved,
        }
    }

    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Binary => 0,
            Self::Ascii => 1,
            Self::Text => 2,
            Self::Reserved => 3,
        }
    }

    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Ascii | Self::Text)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Ascii => "ASCII",
            Self::Text => "TEXT",
            Self::Reserved => "RESERVED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AttributeFormat;

    #[test]
    fn masks_flag_bits() {
        assert_eq!(AttributeFormat::from_u8(0x80), AttributeFormat::Binary);
        assert_eq!(AttributeFormat::from_u8(0x81), AttributeFormat::Ascii);
        assert_eq!(AttributeFormat::from_u8(0x02), AttributeFormat::Text);
    }

    #[test]
    fn reserved_code_is_preserved() {
        let f = AttributeFormat::from_u8(0x83);
        assert_eq!(f, AttributeFormat::Reserved);
        assert_eq!(f.to_u8(), 3);
        assert!(!f.is_textual());
    }

    #[test]
    fn every_format_survives_to_u8() {
        for f in [
            AttributeFormat::Binary,
            AttributeFormat::Ascii,
            AttributeFormat::Text,
            AttributeFormat::Reserved,
        ] {
            assert_eq!(AttributeFormat::from_u8(f.to_u8()), f);
        }
    }
}
