//! The symbol text model.
//!
//! Every codec operates on a text: an ordered sequence of 16-bit code units.
//! Raw bytes enter the pipeline one byte per symbol, and a text leaves it again
//! only if every symbol still fits in a byte. Between a codec and the external
//! compressor, texts travel in a compact wire form (see `serialize_symbols`).

use crate::error::StrataError;
use crate::kernels::leb128;

/// A single code unit of a text.
pub type Symbol = u16;

/// Wire mode: one byte per symbol, every symbol was `<= 255`.
const WIRE_NARROW: u8 = 0;
/// Wire mode: one LEB128 varint per symbol.
const WIRE_VARINT: u8 = 1;

//==================================================================================
// 1. Byte <-> Symbol Conversions
//==================================================================================

pub fn bytes_to_symbols(bytes: &[u8]) -> Vec<Symbol> {
    bytes.iter().map(|&b| Symbol::from(b)).collect()
}

/// Converts a text back to bytes, failing on the first symbol above 255.
pub fn symbols_to_bytes(symbols: &[Symbol]) -> Result<Vec<u8>, StrataError> {
    symbols
        .iter()
        .map(|&s| {
            u8::try_from(s).map_err(|_| StrataError::SymbolOutOfRange {
                symbol: s,
                max: u8::MAX as u16,
            })
        })
        .collect()
}

/// The UTF-16 code units of `s`.
pub fn symbols_from_str(s: &str) -> Vec<Symbol> {
    s.encode_utf16().collect()
}

/// Lossy rendering of a text for logs and diagnostics.
pub fn symbols_to_string_lossy(symbols: &[Symbol]) -> String {
    String::from_utf16_lossy(symbols)
}

/// Encodes a non-negative number as decimal digit symbols.
pub(crate) fn push_decimal(out: &mut Vec<Symbol>, value: usize) {
    out.extend(value.to_string().bytes().map(Symbol::from));
}

//==================================================================================
// 2. Wire Serialization
//==================================================================================

/// Serializes a text for the external compressor: a mode byte followed by
/// either the raw bytes (all symbols `<= 255`) or LEB128 varints.
pub fn serialize_symbols(symbols: &[Symbol]) -> Result<Vec<u8>, StrataError> {
    if let Some(max) = symbols.iter().max() {
        if *max > u8::MAX as Symbol {
            let mut out = Vec::with_capacity(symbols.len() * 2 + 1);
            out.push(WIRE_VARINT);
            leb128::encode(symbols, &mut out)?;
            return Ok(out);
        }
    }
    let mut out = Vec::with_capacity(symbols.len() + 1);
    out.push(WIRE_NARROW);
    // Every symbol was checked to fit above.
    out.extend(symbols.iter().map(|&s| s as u8));
    Ok(out)
}

/// Reverses `serialize_symbols`.
pub fn deserialize_symbols(bytes: &[u8]) -> Result<Vec<Symbol>, StrataError> {
    match bytes.split_first() {
        Some((&WIRE_NARROW, body)) => Ok(bytes_to_symbols(body)),
        Some((&WIRE_VARINT, body)) => leb128::decode_all::<Symbol>(body),
        Some((mode, _)) => Err(StrataError::FrameFormatError(format!(
            "Unknown symbol wire mode {}",
            mode
        ))),
        None => Err(StrataError::FrameFormatError(
            "Symbol wire buffer is empty".to_string(),
        )),
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
