//! Registry value kinds.

use crate::error::{RegError, Result};
use crate::normalize::normalize_type;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The value kinds `reg.exe` can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegType {
    #[serde(rename = "REG_SZ")]
    Sz,
    #[serde(rename = "REG_MULTI_SZ")]
    MultiSz,
    #[serde(rename = "REG_EXPAND_SZ")]
    ExpandSz,
    #[serde(rename = "REG_DWORD")]
    Dword,
    #[serde(rename = "REG_QWORD")]
    Qword,
    #[serde(rename = "REG_BINARY")]
    Binary,
    #[serde(rename = "REG_NONE")]
    None,
}

impl RegType {
    pub const ALL: [RegType; 7] = [
        RegType::Sz,
        RegType::MultiSz,
        RegType::ExpandSz,
        RegType::Dword,
        RegType::Qword,
        RegType::Binary,
        RegType::None,
    ];

    /// Canonical `REG_*` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegType::Sz => "REG_SZ",
            RegType::MultiSz => "REG_MULTI_SZ",
            RegType::ExpandSz => "REG_EXPAND_SZ",
            RegType::Dword => "REG_DWORD",
            RegType::Qword => "REG_QWORD",
            RegType::Binary => "REG_BINARY",
            RegType::None => "REG_NONE",
        }
    }

    /// Parse an optional, loosely spelled type name.
    ///
    /// `None` stays `None` (infer from the value).
    pub fn parse_optional(value_type: Option<&str>) -> Result<Option<RegType>> {
        value_type.map(str::parse).transpose()
    }
}

impl fmt::Display for RegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegType {
    type Err = RegError;

    /// Accepts any case and an optional `REG_` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let canonical = normalize_type(Some(s.trim())).unwrap_or_default();
        RegType::ALL
            .into_iter()
            .find(|t| t.as_str() == canonical)
            .ok_or(RegError::UnknownType(canonical))
    }
}
