//! Run-length transform.
//!
//! Frame: `RLE|` followed by the body. Runs longer than three symbols become
//! `«<symbol><count>»`, where `count` is a single code unit; shorter runs are
//! copied literally. A literal `«` is always emitted as a frame, so every `«`
//! in the body opens a frame and the decoder never has to guess.

use crate::error::StrataError;
use crate::pipeline::models::CodecId;
use crate::types::Symbol;

use super::expect_tag;

const TAG: &[u8] = b"RLE|";

pub const FRAME_OPEN: Symbol = 0xAB; // «
pub const FRAME_CLOSE: Symbol = 0xBB; // »

/// Runs of this length or shorter are copied literally.
const MAX_LITERAL_RUN: usize = 3;
const MAX_FRAME_COUNT: usize = u16::MAX as usize;

pub fn encode(input: &[Symbol]) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(TAG.len() + input.len());
    out.extend(TAG.iter().map(|&b| Symbol::from(b)));

    let mut i = 0;
    while i < input.len() {
        let symbol = input[i];
        let mut run = 1;
        while i + run < input.len() && input[i + run] == symbol {
            run += 1;
        }
        i += run;

        if run <= MAX_LITERAL_RUN && symbol != FRAME_OPEN {
            out.extend(std::iter::repeat(symbol).take(run));
            continue;
        }
        while run > 0 {
            let chunk = run.min(MAX_FRAME_COUNT);
            if chunk <= MAX_LITERAL_RUN && symbol != FRAME_OPEN {
                out.extend(std::iter::repeat(symbol).take(chunk));
            } else {
                // `chunk <= u16::MAX`.
                out.extend([FRAME_OPEN, symbol, chunk as Symbol, FRAME_CLOSE]);
            }
            run -= chunk;
        }
    }
    out
}

pub fn decode(frame: &[Symbol]) -> Result<Vec<Symbol>, StrataError> {
    let body = expect_tag(CodecId::RunLength, frame, TAG)?;
    let mut out = Vec::with_capacity(body.len());

    let mut i = 0;
    while i < body.len() {
        if body[i] != FRAME_OPEN {
            out.push(body[i]);
            i += 1;
            continue;
        }
        match body.get(i + 1..i + 4) {
            Some(&[symbol, count, FRAME_CLOSE]) if count > 0 => {
                out.extend(std::iter::repeat(symbol).take(count as usize));
                i += 4;
            }
            Some(&[_, 0, FRAME_CLOSE]) => {
                return Err(StrataError::malformed(
                    CodecId::RunLength,
                    format!("zero-length run at offset {}", i),
                ))
            }
            _ => {
                return Err(StrataError::malformed(
                    CodecId::RunLength,
                    format!("unterminated run frame at offset {}", i),
                ))
            }
        }
    }
    Ok(out)
}
