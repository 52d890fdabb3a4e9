//! Sort-with-permutation transform.
//!
//! Frame: `SORT|<sorted symbols>|<original positions>`. Both halves have the
//! same length `n`, so the frame is parsed by length rather than by searching
//! for separators, which keeps literal `|` symbols in the data unambiguous.

use crate::error::StrataError;
use crate::pipeline::models::CodecId;
use crate::types::Symbol;

use super::{expect_tag, SEPARATOR};

const TAG: &[u8] = b"SORT|";

/// Positions are stored as one code unit each.
pub const MAX_INPUT_LEN: usize = u16::MAX as usize;

pub fn encode(input: &[Symbol]) -> Result<Vec<Symbol>, StrataError> {
    let n = input.len();
    if n > MAX_INPUT_LEN {
        return Err(StrataError::InputTooLong {
            codec: CodecId::Sort,
            len: n,
            max: MAX_INPUT_LEN,
        });
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| input[i]);

    let mut out = Vec::with_capacity(TAG.len() + 2 * n + 1);
    out.extend(TAG.iter().map(|&b| Symbol::from(b)));
    out.extend(order.iter().map(|&i| input[i]));
    out.push(SEPARATOR);
    // `n <= u16::MAX` so every position fits.
    out.extend(order.iter().map(|&i| i as Symbol));
    Ok(out)
}

pub fn decode(frame: &[Symbol]) -> Result<Vec<Symbol>, StrataError> {
    let body = expect_tag(CodecId::Sort, frame, TAG)?;
    if body.len() % 2 == 0 {
        return Err(StrataError::malformed(
            CodecId::Sort,
            format!("body length {} cannot hold two equal halves", body.len()),
        ));
    }
    let n = body.len() / 2;
    if body[n] != SEPARATOR {
        return Err(StrataError::malformed(
            CodecId::Sort,
            "missing separator between symbols and positions",
        ));
    }
    let (sorted, positions) = (&body[..n], &body[n + 1..]);

    let mut output: Vec<Option<Symbol>> = vec![None; n];
    for (&symbol, &pos) in sorted.iter().zip(positions) {
        let slot = output.get_mut(pos as usize).ok_or_else(|| {
            StrataError::malformed(CodecId::Sort, format!("position {} out of range", pos))
        })?;
        if slot.replace(symbol).is_some() {
            return Err(StrataError::malformed(
                CodecId::Sort,
                format!("position {} appears twice", pos),
            ));
        }
    }
    // n distinct in-range positions fill every slot.
    Ok(output.into_iter().flatten().collect())
}
