// In: src/pipeline/models.rs

//! Strongly-typed descriptions of a transform chain.
//!
//! A `ChainEntry` is the unit of the "work order" recorded by the pipeline: which
//! codec ran and the out-of-band parameters its decoder needs. The chain is
//! serialized to JSON inside the artifact header, so these types are the
//! single source of truth for how a chain looks on disk.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Symbol;

/// The closed set of transform codecs the pipeline knows about.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CodecId {
    Bwt,
    FrequencyGroup,
    RunLength,
    Sort,
    PatternCycle,
    MoveToFront,
    /// Identity; recorded when the selected codec rejected its input.
    Passthrough,
}

impl CodecId {
    /// Every codec a selector or the exploratory loop may pick.
    pub const TRANSFORMS: [CodecId; 6] = [
        CodecId::Bwt,
        CodecId::FrequencyGroup,
        CodecId::RunLength,
        CodecId::Sort,
        CodecId::PatternCycle,
        CodecId::MoveToFront,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CodecId::Bwt => "BWT",
            CodecId::FrequencyGroup => "FREQ",
            CodecId::RunLength => "RLE",
            CodecId::Sort => "SORT",
            CodecId::PatternCycle => "CYC",
            CodecId::MoveToFront => "MTF",
            CodecId::Passthrough => "RAW",
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Out-of-band decoder parameters. Every codec except BWT embeds what it
/// needs in its own output frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodecParams {
    #[default]
    None,
    Bwt { recovery_index: usize },
}

/// The result of a codec's forward pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub output: Vec<Symbol>,
    pub params: CodecParams,
}

impl Encoded {
    pub fn framed(output: Vec<Symbol>) -> Self {
        Self {
            output,
            params: CodecParams::None,
        }
    }
}

/// One applied transform, in order of application.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEntry {
    pub codec: CodecId,
    #[serde(default)]
    pub params: CodecParams,
}
