//! Pattern-cycle folding.
//!
//! Finds the contiguous repetition `pattern × count` covering the most symbols
//! and folds it out of the text. Frame:
//!
//! `CYC|<pattern>|<count>|<offset>|<remainder>`
//!
//! `count` and `offset` are decimal digits. Decoding inserts the expanded
//! pattern into the remainder at `offset`. Patterns containing `|` are never
//! chosen, so the first `|` after the tag always ends the pattern.

use crate::error::StrataError;
use crate::pipeline::models::CodecId;
use crate::types::text::push_decimal;
use crate::types::Symbol;

use super::{expect_tag, SEPARATOR};

const TAG: &[u8] = b"CYC|";

/// The best repetition found by `find_best_cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub start: usize,
    pub pattern_len: usize,
    pub count: usize,
}

impl Cycle {
    pub fn coverage(&self) -> usize {
        self.pattern_len * self.count
    }
}

/// Scans pattern lengths `1..=min(n/2, max_pattern_len)`. For each length `L`
/// a right-to-left pass computes how far `s[i] == s[i + L]` holds from every
/// `i`, which gives the repeat count at every start in O(n). Strictly greater
/// coverage wins, so ties keep the shortest pattern and then the earliest start.
pub fn find_best_cycle(input: &[Symbol], max_pattern_len: Option<usize>) -> Option<Cycle> {
    let n = input.len();
    let limit = max_pattern_len.map_or(n / 2, |cap| cap.min(n / 2));

    let mut pipes_before = Vec::with_capacity(n + 1);
    pipes_before.push(0usize);
    for &s in input {
        let last = pipes_before[pipes_before.len() - 1];
        pipes_before.push(last + usize::from(s == SEPARATOR));
    }

    let mut best: Option<Cycle> = None;
    let mut matching = vec![0usize; n];
    for len in 1..=limit {
        let span = n - len;
        matching[span..].iter_mut().for_each(|m| *m = 0);
        for i in (0..span).rev() {
            matching[i] = if input[i] == input[i + len] {
                matching[i + 1] + 1
            } else {
                0
            };
        }

        for start in 0..span {
            let count = 1 + matching[start] / len;
            if count < 2 || pipes_before[start + len] != pipes_before[start] {
                continue;
            }
            let candidate = Cycle {
                start,
                pattern_len: len,
                count,
            };
            if best.map_or(true, |b| candidate.coverage() > b.coverage()) {
                best = Some(candidate);
            }
        }
    }
    best
}

pub fn encode(input: &[Symbol], max_pattern_len: Option<usize>) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(TAG.len() + input.len() + 8);
    out.extend(TAG.iter().map(|&b| Symbol::from(b)));

    match find_best_cycle(input, max_pattern_len) {
        Some(cycle) => {
            let end = cycle.start + cycle.coverage();
            out.extend_from_slice(&input[cycle.start..cycle.start + cycle.pattern_len]);
            out.push(SEPARATOR);
            push_decimal(&mut out, cycle.count);
            out.push(SEPARATOR);
            push_decimal(&mut out, cycle.start);
            out.push(SEPARATOR);
            out.extend_from_slice(&input[..cycle.start]);
            out.extend_from_slice(&input[end..]);
        }
        None => {
            out.extend([SEPARATOR, Symbol::from(b'0'), SEPARATOR, Symbol::from(b'0'), SEPARATOR]);
            out.extend_from_slice(input);
        }
    }
    out
}

pub fn decode(frame: &[Symbol]) -> Result<Vec<Symbol>, StrataError> {
    let body = expect_tag(CodecId::PatternCycle, frame, TAG)?;
    let (pattern, rest) = split_at_separator(body)?;
    let (count, rest) = split_number(rest)?;
    let (offset, remainder) = split_number(rest)?;

    if pattern.is_empty() && count != 0 {
        return Err(StrataError::malformed(
            CodecId::PatternCycle,
            "empty pattern with non-zero repeat count",
        ));
    }
    if offset > remainder.len() {
        return Err(StrataError::malformed(
            CodecId::PatternCycle,
            format!("offset {} beyond remainder of {}", offset, remainder.len()),
        ));
    }
    let expanded_len = pattern
        .len()
        .checked_mul(count)
        .and_then(|len| len.checked_add(remainder.len()))
        .ok_or_else(|| StrataError::malformed(CodecId::PatternCycle, "expanded length overflows"))?;

    let mut out = Vec::with_capacity(expanded_len);
    out.extend_from_slice(&remainder[..offset]);
    for _ in 0..count {
        out.extend_from_slice(pattern);
    }
    out.extend_from_slice(&remainder[offset..]);
    Ok(out)
}

fn split_at_separator(body: &[Symbol]) -> Result<(&[Symbol], &[Symbol]), StrataError> {
    let pos = body
        .iter()
        .position(|&s| s == SEPARATOR)
        .ok_or_else(|| StrataError::malformed(CodecId::PatternCycle, "missing field separator"))?;
    Ok((&body[..pos], &body[pos + 1..]))
}

fn split_number(body: &[Symbol]) -> Result<(usize, &[Symbol]), StrataError> {
    let (digits, rest) = split_at_separator(body)?;
    if digits.is_empty() {
        return Err(StrataError::malformed(CodecId::PatternCycle, "empty number field"));
    }
    let mut value: usize = 0;
    for &d in digits {
        let digit = match d {
            0x30..=0x39 => usize::from(d - 0x30),
            _ => {
                return Err(StrataError::malformed(
                    CodecId::PatternCycle,
                    format!("non-digit symbol {} in number field", d),
                ))
            }
        };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| StrataError::malformed(CodecId::PatternCycle, "number field overflows"))?;
    }
    Ok((value, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::text::{symbols_from_str, symbols_to_string_lossy};

    fn frame_str(s: &str) -> String {
        symbols_to_string_lossy(&encode(&symbols_from_str(s), None))
    }

    #[test]
    fn test_cycle_folds_leading_repetition() {
        assert_eq!(frame_str("abcabcabcxyz"), "CYC|abc|3|0|xyz");
    }

    #[test]
    fn test_cycle_keeps_prefix_position() {
        assert_eq!(frame_str("xyzabababab"), "CYC|ab|4|3|xyz");
        let input = symbols_from_str("xyzabababab");
        assert_eq!(decode(&encode(&input, None)).unwrap(), input);
    }

    #[test]
    fn test_cycle_ties_prefer_shortest_then_earliest() {
        // "aaaa" is covered fully by "a"×4 and "aa"×2; the shorter pattern wins.
        assert_eq!(frame_str("aaaa"), "CYC|a|4|0|");
        // Equal coverage at two positions keeps the first.
        assert_eq!(frame_str("xxqyy"), "CYC|x|2|0|qyy");
    }

    #[test]
    fn test_cycle_without_repetition() {
        assert_eq!(frame_str("abc"), "CYC||0|0|abc");
        assert_eq!(frame_str(""), "CYC||0|0|");
        let input = symbols_from_str("abc");
        assert_eq!(decode(&encode(&input, None)).unwrap(), input);
    }

    #[test]
    fn test_cycle_never_picks_separator_patterns() {
        let input = symbols_from_str("||||ab");
        assert_eq!(frame_str("||||ab"), "CYC||0|0|||||ab");
        assert_eq!(decode(&encode(&input, None)).unwrap(), input);
    }

    #[test]
    fn test_cycle_roundtrip_and_cap() {
        for s in ["hello hello hello world", "a1b2a1b2a1b2|x|x", "12121212", "zzz"] {
            let input = symbols_from_str(s);
            assert_eq!(decode(&encode(&input, None)).unwrap(), input, "input {:?}", s);
            let capped = encode(&input, Some(1));
            assert_eq!(decode(&capped).unwrap(), input, "capped input {:?}", s);
        }
    }

    #[test]
    fn test_cycle_rejects_corrupt_frames() {
        assert!(decode(&symbols_from_str("CYC|ab|x|0|")).is_err());
        assert!(decode(&symbols_from_str("CYC|ab|2|9|q")).is_err());
        assert!(decode(&symbols_from_str("CYC||3|0|q")).is_err());
        assert!(matches!(
            decode(&symbols_from_str("CYC|ab|2")),
            Err(StrataError::MalformedFrame { codec: CodecId::PatternCycle, .. })
        ));
    }
}
