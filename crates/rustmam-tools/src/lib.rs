use clap::{Args, ValueEnum};
use rustmam_client::MamClient;
use rustmam_core::render::render_attribute;
use rustmam_core::types::{
    attribute_name, lookup_definition, Attribute, AttributeFormat, AttributeId,
};
use rustmam_transport::{Transport, TransportError};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Device options shared by every tool.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Tape device node to open.
    #[arg(short = 'f', long, env = "TAPE", default_value = "/dev/nst0")]
    pub device: PathBuf,
    /// Per-command timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
    /// Write a hex trace of every command exchange to this file, replacing
    /// any previous contents.
    #[arg(long)]
    pub capture: Option<PathBuf>,
}

impl DeviceArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Opens the device, checks it speaks SG v3, and wraps it in a client.
    pub fn open_client(&self) -> Result<MamClient<Box<dyn Transport>>, TransportError> {
        let transport = self.open_transport()?;
        Ok(MamClient::new(transport).with_timeout(self.timeout()))
    }

    #[cfg(target_os = "linux")]
    fn open_transport(&self) -> Result<Box<dyn Transport>, TransportError> {
        use rustmam_transport::{CapturingTransport, ScsiGenericTransport};

        let sg = ScsiGenericTransport::open(&self.device)?;
        sg.check_is_supported_device()?;
        match &self.capture {
            Some(path) => Ok(Box::new(CapturingTransport::to_file(sg, path)?)),
            None => Ok(Box::new(sg)),
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn open_transport(&self) -> Result<Box<dyn Transport>, TransportError> {
        log::debug!("no device transport for {}", self.device.display());
        Err(TransportError::Unavailable)
    }
}

/// CLI-friendly attribute format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Binary,
    Ascii,
    Text,
}

impl FormatArg {
    pub const fn into_format(self) -> AttributeFormat {
        match self {
            Self::Binary => AttributeFormat::Binary,
            Self::Ascii => AttributeFormat::Ascii,
            Self::Text => AttributeFormat::Text,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{value} does not fit in {width} bytes")]
    DoesNotFit { value: u64, width: usize },
    #[error("value is {len} bytes but the field is {width}")]
    TooLong { len: usize, width: usize },
    #[error("zero-width field")]
    ZeroWidth,
}

fn parse_u64(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Parses an attribute id written in decimal or `0x` hex.
pub fn parse_attribute_id(s: &str) -> Result<AttributeId, String> {
    let raw = parse_u64(s).ok_or_else(|| format!("'{s}' is not a number"))?;
    u16::try_from(raw)
        .map(AttributeId::new)
        .map_err(|_| format!("{raw:#x} is out of range for an attribute id"))
}

/// Builds the bytes to write for `id`.
///
/// Binary values become a big-endian integer `width` bytes wide. Textual values
/// are space padded to `width`. `width` defaults to the expected length of a
/// known attribute; unknown binary attributes default to 8 bytes and unknown
/// textual ones are written as given.
pub fn build_value(
    id: AttributeId,
    format: FormatArg,
    value: &str,
    width: Option<usize>,
) -> Result<Vec<u8>, ValueError> {
    let width = width.or_else(|| {
        lookup_definition(id)
            .and_then(|d| d.expected_length)
            .map(usize::from)
    });
    match format {
        FormatArg::Binary => {
            let n = parse_u64(value).ok_or_else(|| ValueError::NotANumber(value.to_string()))?;
            let width = width.unwrap_or(8);
            if width == 0 {
                return Err(ValueError::ZeroWidth);
            }
            if width < 8 && n >> (width * 8) != 0 {
                return Err(ValueError::DoesNotFit { value: n, width });
            }
            let be = n.to_be_bytes();
            let mut out = vec![0u8; width.saturating_sub(8)];
            out.extend_from_slice(&be[8usize.saturating_sub(width)..]);
            Ok(out)
        }
        FormatArg::Ascii | FormatArg::Text => {
            let mut out = value.as_bytes().to_vec();
            if let Some(width) = width {
                if out.len() > width {
                    return Err(ValueError::TooLong {
                        len: out.len(),
                        width,
                    });
                }
                out.resize(width, b' ');
            }
            Ok(out)
        }
    }
}

/// Display form of one attribute, as printed by the tools and `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeView {
    pub id: AttributeId,
    pub name: String,
    pub format: &'static str,
    pub read_only: bool,
    pub length: u16,
    pub value: String,
}

impl From<&Attribute> for AttributeView {
    fn from(attr: &Attribute) -> Self {
        Self {
            id: attr.id(),
            name: attribute_name(attr.id()).into_owned(),
            format: attr.format().name(),
            read_only: attr.read_only(),
            length: attr.length(),
            value: render_attribute(attr),
        }
    }
}

impl std::fmt::Display for AttributeView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<40} {:<6} {} [{}] {}",
            self.id,
            self.name,
            self.format,
            if self.read_only { "RO" } else { "RW" },
            self.length,
            self.value
        )
    }
}
