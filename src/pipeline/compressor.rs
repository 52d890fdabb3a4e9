// In: src/pipeline/compressor.rs

//! The external byte compressor applied at the tail of every cycle.
//!
//! The pipeline only relies on the `ExternalCompressor` contract: lossless,
//! deterministic, and `decompress(compress(x)) == x`. `ZstdCompressor` is the
//! implementation wired in by default.

use crate::config::StrataConfig;
use crate::error::StrataError;
use crate::kernels::zstd;

pub trait ExternalCompressor: Send + Sync {
    /// Stable identifier stored in every artifact this compressor produced.
    fn name(&self) -> &'static str;

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, StrataError>;

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>, StrataError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    pub fn new(level: i32) -> Self {
        Self { level }
    }

    pub fn from_config(config: &StrataConfig) -> Self {
        Self::new(config.zstd_level())
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::from_config(&StrataConfig::default())
    }
}

impl ExternalCompressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, StrataError> {
        zstd::encode(bytes, self.level)
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>, StrataError> {
        zstd::decode(bytes)
    }
}
