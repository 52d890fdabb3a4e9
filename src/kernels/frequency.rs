//! Frequency-group transform.
//!
//! Frame: `FREQ|<header>|<indices>`. The header lists each distinct symbol
//! once, most frequent first (ties by ascending symbol value); every input
//! symbol is then replaced by its header index.
//!
//! Because the header is duplicate-free, at most one `|` can appear inside
//! it, so the real separator is either the first or the second `|` after the
//! tag. The decoder tries both and keeps the split that forms a canonical
//! frame.

use std::collections::HashMap;

use crate::error::StrataError;
use crate::pipeline::models::CodecId;
use crate::types::Symbol;

use super::{expect_tag, SEPARATOR};

const TAG: &[u8] = b"FREQ|";

/// Distinct symbols ordered by descending count, then ascending value.
fn ranked_header(input: &[Symbol]) -> Vec<(Symbol, usize)> {
    let mut counts: HashMap<Symbol, usize> = HashMap::new();
    for &s in input {
        *counts.entry(s).or_insert(0) += 1;
    }
    let mut ranked: Vec<(Symbol, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

pub fn encode(input: &[Symbol]) -> Vec<Symbol> {
    let header = ranked_header(input);
    let index_of: HashMap<Symbol, Symbol> = header
        .iter()
        .enumerate()
        // At most 65536 distinct u16 values, so every index fits.
        .map(|(i, &(s, _))| (s, i as Symbol))
        .collect();

    let mut out = Vec::with_capacity(TAG.len() + header.len() + 1 + input.len());
    out.extend(TAG.iter().map(|&b| Symbol::from(b)));
    out.extend(header.iter().map(|&(s, _)| s));
    out.push(SEPARATOR);
    out.extend(input.iter().filter_map(|s| index_of.get(s).copied()));
    out
}

pub fn decode(frame: &[Symbol]) -> Result<Vec<Symbol>, StrataError> {
    let body = expect_tag(CodecId::FrequencyGroup, frame, TAG)?;
    let candidates = body
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == SEPARATOR)
        .map(|(i, _)| i)
        .take(2);

    let mut last_reason = String::from("missing header separator");
    for split in candidates {
        let (header, indices) = (&body[..split], &body[split + 1..]);
        match expand(header, indices) {
            Ok(output) => return Ok(output),
            Err(reason) => last_reason = reason,
        }
    }
    Err(StrataError::malformed(CodecId::FrequencyGroup, last_reason))
}

/// Maps indices back through `header`, checking that the pair is exactly
/// what `encode` would have produced for the result.
fn expand(header: &[Symbol], indices: &[Symbol]) -> Result<Vec<Symbol>, String> {
    let mut counts = vec![0usize; header.len()];
    let mut output = Vec::with_capacity(indices.len());
    for &idx in indices {
        let symbol = header
            .get(idx as usize)
            .ok_or_else(|| format!("index {} outside header of {}", idx, header.len()))?;
        counts[idx as usize] += 1;
        output.push(*symbol);
    }

    let canonical = ranked_header(&output);
    let matches = canonical.len() == header.len()
        && canonical
            .iter()
            .zip(header.iter().zip(&counts))
            .all(|(&(s, c), (&h, &hc))| s == h && c == hc);
    if !matches {
        return Err("header is not the ranked symbol set of the indices".to_string());
    }
    Ok(output)
}
