//! This module defines the coarse content classification attached to every
//! analysis report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The coarse shape of a text as judged by the analyzer.
///
/// Classification is ordered: `Base64` is checked before `Text`, so a string
/// of plain letters is `Base64` even though it is also printable.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    /// Every symbol is in `A-Za-z0-9+/=`.
    Base64,
    /// At least 90% of symbols are printable ASCII.
    Text,
    Binary,
}

impl DataType {
    pub fn is_base64_symbol(symbol: u16) -> bool {
        matches!(symbol, 0x41..=0x5A | 0x61..=0x7A | 0x30..=0x39)
            || symbol == u16::from(b'+')
            || symbol == u16::from(b'/')
            || symbol == u16::from(b'=')
    }

    pub fn is_printable(symbol: u16) -> bool {
        (0x20..=0x7E).contains(&symbol)
    }
}

/// Provides the canonical string representation for a `DataType`.
impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Base64 => "BASE64",
            DataType::Text => "TEXT",
            DataType::Binary => "BINARY",
        };
        f.write_str(name)
    }
}
