//! Rendering of identifier and key byte sequences for the console.
//!
//! A field is rendered in one of three operator-selected forms:
//!
//! * `hex`: `DEADBEEF`
//! * `msb`: `{0xDE, 0xAD, 0xBE, 0xEF} (msb first)`
//! * `lsb`: `{0xEF, 0xBE, 0xAD, 0xDE} (lsb first)`
//!
//! Fields that are not set render as `<nil>` whatever the format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder printed for a field that carries no value.
pub const NIL: &str = "<nil>";

/// A value backed by a fixed byte sequence that may be logically unset.
pub trait FormattableBytes {
    /// Whether the value is unset, independent of its byte content.
    fn is_empty(&self) -> bool;

    /// The stored bytes, most significant byte first.
    fn bytes(&self) -> &[u8];
}

impl<T: FormattableBytes> FormattableBytes for Option<T> {
    fn is_empty(&self) -> bool {
        self.as_ref().is_none_or(FormattableBytes::is_empty)
    }

    fn bytes(&self) -> &[u8] {
        self.as_ref().map(FormattableBytes::bytes).unwrap_or_default()
    }
}

impl<T: FormattableBytes + ?Sized> FormattableBytes for &T {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn bytes(&self) -> &[u8] {
        (**self).bytes()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unknown byte format \"{0}\" (expected hex, msb or lsb)")]
    Unknown(String),
}

/// How a byte sequence is written out.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ByteFormat {
    /// Contiguous uppercase hex digits.
    #[default]
    Hex,
    /// C-style array, most significant byte first.
    Msb,
    /// C-style array, least significant byte first.
    Lsb,
}

impl ByteFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ByteFormat::Hex => "hex",
            ByteFormat::Msb => "msb",
            ByteFormat::Lsb => "lsb",
        }
    }
}

impl fmt::Display for ByteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(ByteFormat::Hex),
            "msb" => Ok(ByteFormat::Msb),
            "lsb" => Ok(ByteFormat::Lsb),
            _ => Err(FormatError::Unknown(s.to_string())),
        }
    }
}

/// A renderable device field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Identifier or key material.
    Bytes { empty: bool, bytes: Vec<u8> },
    /// Anything else, already in display form.
    Opaque(String),
}

impl FieldValue {
    pub fn from_bytes<T: FormattableBytes + ?Sized>(value: &T) -> Self {
        FieldValue::Bytes {
            empty: value.is_empty(),
            bytes: value.bytes().to_vec(),
        }
    }

    pub fn opaque(value: impl fmt::Display) -> Self {
        FieldValue::Opaque(value.to_string())
    }
}

/// Returns a copy of `bytes` in reverse order, converting between MSB-first and LSB-first.
pub fn reverse(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().rev().copied().collect()
}

/// Renders `bytes` as a brace-delimited list of `0x`-prefixed byte literals.
pub fn c_style(bytes: &[u8]) -> String {
    let literals = bytes
        .iter()
        .map(|byte| format!("0x{:02X}", byte))
        .collect::<Vec<_>>();
    format!("{{{}}}", literals.join(", "))
}

pub fn format_value(value: &FieldValue, format: ByteFormat) -> String {
    match value {
        FieldValue::Opaque(text) => text.clone(),
        FieldValue::Bytes { empty: true, .. } => NIL.to_string(),
        FieldValue::Bytes { bytes, .. } => match format {
            ByteFormat::Hex => hex::encode_upper(bytes),
            ByteFormat::Msb => format!("{} (msb first)", c_style(bytes)),
            ByteFormat::Lsb => format!("{} (lsb first)", c_style(&reverse(bytes))),
        },
    }
}

pub fn format_bytes<T: FormattableBytes + ?Sized>(value: &T, format: ByteFormat) -> String {
    format_value(&FieldValue::from_bytes(value), format)
}
