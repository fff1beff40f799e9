//! Table of well-known MAM attributes.
//!
//! Entries are display hints only. The format and length decoded from the
//! wire always take precedence over what is listed here.

use crate::types::{AttributeFormat, AttributeId};
use alloc::borrow::Cow;
use alloc::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeDefinition {
    pub id: AttributeId,
    /// `None` for attributes whose length varies by medium or vendor.
    pub expected_length: Option<u16>,
    pub expected_format: AttributeFormat,
    pub name: &'static str,
}

const fn def(
    id: u16,
    expected_length: Option<u16>,
    expected_format: AttributeFormat,
    name: &'static str,
) -> AttributeDefinition {
    AttributeDefinition {
        id: AttributeId::new(id),
        expected_length,
        expected_format,
        name,
    }
}

use AttributeFormat::{Ascii, Binary, Text};

#[rustfmt::skip]
pub static ATTRIBUTE_DEFINITIONS: &[AttributeDefinition] = &[
    def(0x0000, Some(8), Binary, "Remaining capacity in partition"),
    def(0x0001, Some(8), Binary, "Maximum capacity in partition"),
    def(0x0002, Some(8), Binary, "TapeAlert flags"),
    def(0x0003, Some(8), Binary, "Load count"),
    def(0x0004, Some(8), Binary, "MAM space remaining"),
    def(0x0005, Some(8), Ascii, "Assigning organization"),
    def(0x0006, Some(1), Binary, "Format density code"),
    def(0x0007, Some(2), Binary, "Initialization count"),
    def(0x0008, Some(32), Ascii, "Volume identifier"),
    def(0x0009, Some(4), Binary, "Volume change reference"),
    def(0x020A, Some(40), Ascii, "Device vendor/serial number at last load"),
    def(0x020B, Some(40), Ascii, "Device vendor/serial number at load-1"),
    def(0x020C, Some(40), Ascii, "Device vendor/serial number at load-2"),
    def(0x020D, Some(40), Ascii, "Device vendor/serial number at load-3"),
    def(0x0220, Some(8), Binary, "Total MiB written in medium life"),
    def(0x0221, Some(8), Binary, "Total MiB read in medium life"),
    def(0x0222, Some(8), Binary, "Total MiB written in current/last load"),
    def(0x0223, Some(8), Binary, "Total MiB read in current/last load"),
    def(0x0224, Some(8), Binary, "Logical position of first encrypted block"),
    def(
        0x0225,
        Some(8),
        Binary,
        "Logical position of first unencrypted block after first encrypted block",
    ),
    def(0x0340, Some(90), Binary, "Medium usage history"),
    def(0x0341, Some(60), Binary, "Partition usage history"),
    def(0x0400, Some(8), Ascii, "Medium manufacturer"),
    def(0x0401, Some(32), Ascii, "Medium serial number"),
    def(0x0402, Some(4), Binary, "Medium length"),
    def(0x0403, Some(4), Binary, "Medium width"),
    def(0x0404, Some(8), Ascii, "Assigning organization"),
    def(0x0405, Some(1), Binary, "Medium density code"),
    def(0x0406, Some(8), Ascii, "Medium manufacture date"),
    def(0x0407, Some(8), Binary, "MAM capacity"),
    def(0x0408, Some(1), Binary, "Medium type"),
    def(0x0409, Some(2), Binary, "Medium type information"),
    def(0x040A, None, Binary, "Numeric medium serial number"),
    def(0x0800, Some(8), Ascii, "Application vendor"),
    def(0x0801, Some(32), Ascii, "Application name"),
    def(0x0802, Some(8), Ascii, "Application version"),
    def(0x0803, Some(160), Text, "User medium text label"),
    def(0x0804, Some(12), Ascii, "Date and time last written"),
    def(0x0805, Some(1), Binary, "Text localization identifier"),
    def(0x0806, Some(32), Ascii, "Barcode"),
    def(0x0807, Some(80), Text, "Owning host textual name"),
    def(0x0808, Some(160), Text, "Media pool"),
    def(0x0809, Some(16), Ascii, "Partition user text label"),
    def(0x080A, Some(1), Binary, "Load/unload at partition"),
    def(0x080B, Some(16), Ascii, "Application format version"),
    def(0x080C, None, Binary, "Volume coherency information"),
    def(0x0820, Some(36), Binary, "Medium globally unique identifier"),
    def(0x0821, Some(36), Binary, "Media pool globally unique identifier"),
    def(0x1000, Some(28), Binary, "Unique cartridge identity"),
    def(0x1001, Some(24), Binary, "Alternate unique cartridge identity"),
];

/// Linear search of the definition table.
pub fn lookup_definition(id: AttributeId) -> Option<&'static AttributeDefinition> {
    ATTRIBUTE_DEFINITIONS.iter().find(|d| d.id == id)
}

/// Human-readable name of an attribute; unknown ids get a synthesized label.
pub fn attribute_name(id: AttributeId) -> Cow<'static, str> {
    match lookup_definition(id) {
        Some(d) => Cow::Borrowed(d.name),
        None => Cow::Owned(format!("Unknown or reserved attribute ID {:x}", id.raw())),
    }
}
