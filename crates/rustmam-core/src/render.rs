//! Turns attribute values into display strings.

use crate::encoding::primitives::read_be_unsigned;
use crate::types::{Attribute, AttributeFormat};
use alloc::string::{String, ToString};
use core::fmt::Write;

/// Renders a value according to its decoded format and length.
///
/// Binary values of 1, 2, 4 or 8 bytes print as unsigned decimal; any other
/// binary length prints as uppercase hex without separators. ASCII and TEXT
/// values print verbatim, trailing pad spaces included; bytes that are not
/// valid UTF-8 print as `\xNN` escapes instead of being replaced.
pub fn render_value(format: AttributeFormat, value: &[u8]) -> String {
    match format {
        AttributeFormat::Ascii | AttributeFormat::Text => render_text(value),
        AttributeFormat::Binary => match read_be_unsigned(value) {
            Some(n) => n.to_string(),
            None => hex::encode_upper(value),
        },
        AttributeFormat::Reserved => hex::encode_upper(value),
    }
}

fn render_text(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match core::str::from_utf8(bytes) {
            Ok(text) => {
                out.push_str(text);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                out.push_str(core::str::from_utf8(valid).unwrap_or_default());
                let bad = e.error_len().unwrap_or(rest.len());
                for b in &rest[..bad] {
                    let _ = write!(out, "\\x{b:02x}");
                }
                bytes = &rest[bad..];
            }
        }
    }
}

pub fn render_attribute(attribute: &Attribute) -> String {
    render_value(attribute.format(), attribute.value())
}
