//! Move-to-front transform over the fixed byte alphabet.
//!
//! Frame: `MTF|<indices>`. The working alphabet starts as `0..=255` in
//! ascending order; each symbol is replaced by its current index and then
//! moved to the front.

use crate::error::StrataError;
use crate::pipeline::models::CodecId;
use crate::types::Symbol;

use super::expect_tag;

const TAG: &[u8] = b"MTF|";
const ALPHABET_SIZE: usize = 256;

fn initial_alphabet() -> [u8; ALPHABET_SIZE] {
    let mut alphabet = [0u8; ALPHABET_SIZE];
    for (i, slot) in alphabet.iter_mut().enumerate() {
        *slot = i as u8;
    }
    alphabet
}

/// Moves the entry at `idx` to the front, shifting the prefix right by one.
fn move_to_front(alphabet: &mut [u8; ALPHABET_SIZE], idx: usize) {
    let symbol = alphabet[idx];
    alphabet.copy_within(0..idx, 1);
    alphabet[0] = symbol;
}

/// Rejects symbols outside the byte alphabet.
pub fn encode(input: &[Symbol]) -> Result<Vec<Symbol>, StrataError> {
    let mut alphabet = initial_alphabet();
    let mut out = Vec::with_capacity(TAG.len() + input.len());
    out.extend(TAG.iter().map(|&b| Symbol::from(b)));

    for &s in input {
        let byte = u8::try_from(s).map_err(|_| StrataError::SymbolOutOfRange {
            symbol: s,
            max: u8::MAX as u16,
        })?;
        // Every byte value is present in the alphabet.
        let idx = alphabet.iter().position(|&c| c == byte).unwrap_or(0);
        out.push(idx as Symbol);
        move_to_front(&mut alphabet, idx);
    }
    Ok(out)
}

pub fn decode(frame: &[Symbol]) -> Result<Vec<Symbol>, StrataError> {
    let body = expect_tag(CodecId::MoveToFront, frame, TAG)?;
    let mut alphabet = initial_alphabet();
    let mut out = Vec::with_capacity(body.len());

    for &idx in body {
        let idx = idx as usize;
        if idx >= ALPHABET_SIZE {
            return Err(StrataError::malformed(
                CodecId::MoveToFront,
                format!("index {} outside the {}-symbol alphabet", idx, ALPHABET_SIZE),
            ));
        }
        out.push(Symbol::from(alphabet[idx]));
        move_to_front(&mut alphabet, idx);
    }
    Ok(out)
}
