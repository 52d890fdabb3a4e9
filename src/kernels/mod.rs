//! The pure, stateless transform kernels and their dispatchers.
//!
//! Each submodule implements one reversible transform over symbol texts (or,
//! for `zstd` and `leb128`, over bytes). The dispatchers below are the single
//! place where a `CodecId` is mapped to a kernel; the match is exhaustive, so
//! adding a codec id without a kernel is a compile error.

pub mod bwt;
pub mod cycle;
pub mod frequency;
pub mod leb128;
pub mod mtf;
pub mod rle;
pub mod sort;
pub mod zstd;

use crate::error::StrataError;
use crate::pipeline::models::{CodecId, CodecParams, Encoded};
use crate::types::Symbol;

/// The field separator shared by every self-describing frame.
pub const SEPARATOR: Symbol = b'|' as Symbol;

/// Kernel settings that are not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelOptions {
    /// See `cycle::find_best_cycle`.
    pub max_cycle_pattern_len: Option<usize>,
}

impl Default for KernelOptions {
    fn default() -> Self {
        Self {
            max_cycle_pattern_len: Some(1024),
        }
    }
}

/// Strips a frame tag, failing if the frame was produced by another codec.
pub(crate) fn expect_tag<'a>(
    codec: CodecId,
    frame: &'a [Symbol],
    tag: &[u8],
) -> Result<&'a [Symbol], StrataError> {
    let has_tag = frame.len() >= tag.len()
        && frame
            .iter()
            .zip(tag)
            .all(|(&s, &t)| s == Symbol::from(t));
    if !has_tag {
        return Err(StrataError::malformed(
            codec,
            format!("missing '{}' tag", String::from_utf8_lossy(tag)),
        ));
    }
    Ok(&frame[tag.len()..])
}

//==================================================================================
// Dispatchers
//==================================================================================

pub fn dispatch_encode(
    codec: CodecId,
    input: &[Symbol],
    options: &KernelOptions,
) -> Result<Encoded, StrataError> {
    let encoded = match codec {
        CodecId::Bwt => {
            let (output, recovery_index) = bwt::encode(input);
            Encoded {
                output,
                params: CodecParams::Bwt { recovery_index },
            }
        }
        CodecId::FrequencyGroup => Encoded::framed(frequency::encode(input)),
        CodecId::RunLength => Encoded::framed(rle::encode(input)),
        CodecId::Sort => Encoded::framed(sort::encode(input)?),
        CodecId::PatternCycle => {
            Encoded::framed(cycle::encode(input, options.max_cycle_pattern_len))
        }
        CodecId::MoveToFront => Encoded::framed(mtf::encode(input)?),
        CodecId::Passthrough => Encoded::framed(input.to_vec()),
    };
    Ok(encoded)
}

pub fn dispatch_decode(
    codec: CodecId,
    output: &[Symbol],
    params: &CodecParams,
) -> Result<Vec<Symbol>, StrataError> {
    match (codec, params) {
        (CodecId::Bwt, CodecParams::Bwt { recovery_index }) => bwt::decode(output, *recovery_index),
        (CodecId::Bwt, CodecParams::None) => Err(StrataError::malformed(
            CodecId::Bwt,
            "recovery index missing from chain entry",
        )),
        (CodecId::FrequencyGroup, _) => frequency::decode(output),
        (CodecId::RunLength, _) => rle::decode(output),
        (CodecId::Sort, _) => sort::decode(output),
        (CodecId::PatternCycle, _) => cycle::decode(output),
        (CodecId::MoveToFront, _) => mtf::decode(output),
        (CodecId::Passthrough, _) => Ok(output.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::text::symbols_from_str;

    #[test]
    fn test_every_codec_roundtrips_through_dispatch() {
        let options = KernelOptions::default();
        let input = symbols_from_str("aaaaabracadabra|| «» abracadabra 0123 zzzz");
        for codec in CodecId::TRANSFORMS.iter().copied().chain([CodecId::Passthrough]) {
            let encoded = dispatch_encode(codec, &input, &options).unwrap();
            let decoded = dispatch_decode(codec, &encoded.output, &encoded.params).unwrap();
            assert_eq!(decoded, input, "codec {}", codec);
        }
    }

    #[test]
    fn test_frames_from_one_codec_are_rejected_by_another() {
        let options = KernelOptions::default();
        let input = symbols_from_str("hello world");
        let freq = dispatch_encode(CodecId::FrequencyGroup, &input, &options).unwrap();
        for codec in [CodecId::RunLength, CodecId::Sort, CodecId::PatternCycle, CodecId::MoveToFront] {
            assert!(matches!(
                dispatch_decode(codec, &freq.output, &CodecParams::None),
                Err(StrataError::MalformedFrame { .. })
            ));
        }
        assert!(dispatch_decode(CodecId::Bwt, &input, &CodecParams::None).is_err());
    }
}
