//! Conversion between native values and the `reg.exe` wire text.
//!
//! # Type inference
//!
//! When no type is declared, the shape of [`RegData`] decides it:
//!
//! | Shape                  | Inferred type  | Wire text                         |
//! |------------------------|----------------|-----------------------------------|
//! | `Binary`               | `REG_BINARY`   | lowercase hex                     |
//! | `MultiString`          | `REG_MULTI_SZ` | elements joined with literal `\0` |
//! | `Number` up to 32 bits | `REG_DWORD`    | decimal                           |
//! | `Number` above that    | `REG_QWORD`    | decimal                           |
//! | `String`               | `REG_SZ`       | unchanged                         |
//!
//! The `\0` separator is the two characters backslash and zero, not a NUL.
//!
//! [`decode`] is the left inverse of [`RegData::encode`] for every type except
//! `REG_QWORD`, which stays text unless [`DecodeOptions::convert_qword`] is set.

use crate::config::RegConfig;
use crate::error::{RegError, Result};
use crate::types::RegType;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A native registry value.
///
/// Every byte-sequence shape (`Vec<u8>`, `&[u8]`, `[u8; N]`, [`Bytes`])
/// converts into `Binary`, so they all take the same encoding path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegData {
    Binary(Vec<u8>),
    MultiString(Vec<String>),
    Number(u64),
    String(String),
}

/// Wire text plus the type it was serialized under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub data: String,
    pub value_type: RegType,
}

/// Knobs for [`decode_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Parse `REG_QWORD` text into [`RegData::Number`].
    pub convert_qword: bool,
}

impl RegData {
    /// Serialize under `declared`, or under the type inferred from the shape.
    pub fn encode(&self, declared: Option<RegType>) -> Encoded {
        match self {
            RegData::Binary(bytes) => {
                let value_type = declared.unwrap_or(RegType::Binary);
                let data = if value_type == RegType::Binary {
                    hex::encode(bytes)
                } else {
                    String::from_utf8_lossy(bytes).into_owned()
                };
                Encoded { data, value_type }
            }
            RegData::MultiString(items) => Encoded {
                data: items.join(RegConfig::MULTI_SZ_SEPARATOR),
                value_type: declared.unwrap_or(RegType::MultiSz),
            },
            RegData::Number(n) => Encoded {
                data: n.to_string(),
                value_type: declared.unwrap_or_else(|| number_type(*n)),
            },
            RegData::String(s) => {
                let data = match declared {
                    Some(RegType::Binary) => hex::encode(s.as_bytes()),
                    // Caller pre-joined a list with real NULs.
                    Some(RegType::MultiSz) => s.replace('\0', RegConfig::MULTI_SZ_SEPARATOR),
                    _ => s.clone(),
                };
                Encoded {
                    data,
                    value_type: declared.unwrap_or(RegType::Sz),
                }
            }
        }
    }

    /// The type this value would be inferred as.
    pub fn inferred_type(&self) -> RegType {
        match self {
            RegData::Binary(_) => RegType::Binary,
            RegData::MultiString(_) => RegType::MultiSz,
            RegData::Number(n) => number_type(*n),
            RegData::String(_) => RegType::Sz,
        }
    }
}

/// DWORD when the number fits in 32 bits, QWORD otherwise.
fn number_type(n: u64) -> RegType {
    if u32::try_from(n).is_ok() {
        RegType::Dword
    } else {
        RegType::Qword
    }
}

/// Encode an optional value. An absent value passes through with its
/// declared type untouched.
pub fn encode(
    value: Option<&RegData>,
    declared: Option<RegType>,
) -> (Option<String>, Option<RegType>) {
    match value {
        None => (None, declared),
        Some(value) => {
            let encoded = value.encode(declared);
            (Some(encoded.data), Some(encoded.value_type))
        }
    }
}

/// Parse wire text back into a native value.
///
/// An empty `REG_MULTI_SZ` string decodes to a list holding one empty
/// string, so an empty list does not survive the round trip.
pub fn decode(wire: &str, value_type: RegType) -> Result<RegData> {
    decode_with(wire, value_type, DecodeOptions::default())
}

pub fn decode_with(wire: &str, value_type: RegType, options: DecodeOptions) -> Result<RegData> {
    match value_type {
        RegType::Binary => Ok(RegData::Binary(hex::decode(wire.trim())?)),
        RegType::Dword => {
            let n = parse_integer(wire)?;
            u32::try_from(n).map_err(|_| RegError::InvalidInteger {
                value: wire.to_string(),
            })?;
            Ok(RegData::Number(n))
        }
        RegType::Qword if options.convert_qword => Ok(RegData::Number(parse_integer(wire)?)),
        RegType::MultiSz => Ok(RegData::MultiString(
            wire.split(RegConfig::MULTI_SZ_SEPARATOR)
                .map(str::to_string)
                .collect(),
        )),
        _ => Ok(RegData::String(wire.to_string())),
    }
}

/// Decimal or `0x`-prefixed hex, as printed by `reg query`.
fn parse_integer(wire: &str) -> Result<u64> {
    let text = wire.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|_| RegError::InvalidInteger {
        value: wire.to_string(),
    })
}

impl From<Vec<u8>> for RegData {
    fn from(bytes: Vec<u8>) -> Self {
        RegData::Binary(bytes)
    }
}

impl From<&[u8]> for RegData {
    fn from(bytes: &[u8]) -> Self {
        RegData::Binary(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for RegData {
    fn from(bytes: [u8; N]) -> Self {
        RegData::Binary(bytes.to_vec())
    }
}

impl From<Bytes> for RegData {
    fn from(bytes: Bytes) -> Self {
        RegData::Binary(bytes.to_vec())
    }
}

impl From<Vec<String>> for RegData {
    fn from(items: Vec<String>) -> Self {
        RegData::MultiString(items)
    }
}

impl From<&[&str]> for RegData {
    fn from(items: &[&str]) -> Self {
        RegData::MultiString(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<u32> for RegData {
    fn from(n: u32) -> Self {
        RegData::Number(u64::from(n))
    }
}

impl From<u64> for RegData {
    fn from(n: u64) -> Self {
        RegData::Number(n)
    }
}

impl From<String> for RegData {
    fn from(s: String) -> Self {
        RegData::String(s)
    }
}

impl From<&str> for RegData {
    fn from(s: &str) -> Self {
        RegData::String(s.to_string())
    }
}
