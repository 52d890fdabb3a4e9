// In: src/pipeline/compare.rs

//! Side-by-side comparison of every registered transform.
//!
//! Each transform is applied once to the same input, followed by the external
//! compressor, and its size is measured against the baseline of compressing
//! the input untransformed. Every result is also decoded back, so a transform
//! that does not invert the input is reported rather than ranked silently.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

use crate::error::StrataError;
use crate::pipeline::models::CodecId;
use crate::pipeline::orchestrator::CompressionPipeline;
use crate::types::text::bytes_to_symbols;

/// One transform's single-cycle result.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    /// The codec that was asked for.
    pub codec: CodecId,
    /// True when the codec refused the input and passthrough ran instead.
    pub refused: bool,
    pub transformed_symbols: usize,
    pub compressed_size: usize,
    /// Whether decompressing the result gave back the input.
    pub reversible: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransformComparison {
    pub original_size: usize,
    /// The untransformed input after the external compressor.
    pub baseline_size: usize,
    /// Best (smallest) first, including the passthrough baseline row.
    pub records: Vec<ComparisonRecord>,
}

impl TransformComparison {
    /// The smallest reversible result.
    pub fn best(&self) -> Option<&ComparisonRecord> {
        self.records.iter().find(|r| r.reversible)
    }

    pub fn ratio(&self, record: &ComparisonRecord) -> f64 {
        if self.original_size == 0 {
            return 1.0;
        }
        record.compressed_size as f64 / self.original_size as f64
    }

    /// Percent saved relative to the baseline; negative when larger.
    pub fn improvement(&self, record: &ComparisonRecord) -> f64 {
        if self.baseline_size == 0 {
            return 0.0;
        }
        (1.0 - record.compressed_size as f64 / self.baseline_size as f64) * 100.0
    }

    /// A human-readable ranking table.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<5} {:>10} {:>10} {:>7} {:>9}  status",
            "codec", "symbols", "out", "ratio", "gain %"
        );
        for r in &self.records {
            let status = if !r.reversible {
                "BROKEN".red().bold()
            } else if r.codec == CodecId::Passthrough {
                "BASELINE".yellow()
            } else if r.refused {
                "REFUSED".yellow()
            } else if r.compressed_size < self.baseline_size {
                "BETTER".green()
            } else {
                "WORSE".red()
            };
            let _ = writeln!(
                out,
                "{:<5} {:>10} {:>10} {:>7.3} {:>+9.2}  {}",
                r.codec.name(),
                r.transformed_symbols,
                r.compressed_size,
                self.ratio(r),
                self.improvement(r),
                status
            );
        }
        let _ = writeln!(
            out,
            "{} {} bytes, baseline {} bytes",
            "input".bold(),
            self.original_size,
            self.baseline_size
        );
        out
    }
}

impl CompressionPipeline {
    /// Applies every registered transform, plus passthrough, for one cycle
    /// each and ranks the results by compressed size.
    pub fn compare(&self, data: &[u8]) -> Result<TransformComparison, StrataError> {
        let symbols = bytes_to_symbols(data);
        let mut baseline_size = 0;
        let mut records = Vec::new();

        let candidates = std::iter::once(CodecId::Passthrough).chain(self.registry().transforms());
        for codec in candidates {
            let attempt = self.apply_codec(codec, &symbols)?;
            let reversible = match self.invert_entry(&attempt.entry, &attempt.compressed) {
                Ok(bytes) => bytes == data,
                Err(e) => {
                    log::warn!("[Compare] {} output does not decode: {}", codec, e);
                    false
                }
            };
            if codec == CodecId::Passthrough {
                baseline_size = attempt.compressed.len();
            }
            records.push(ComparisonRecord {
                codec,
                refused: attempt.entry.codec != codec,
                transformed_symbols: attempt.transformed_symbols,
                compressed_size: attempt.compressed.len(),
                reversible,
            });
        }

        // Stable: equal sizes keep the baseline first, then `CodecId` order.
        records.sort_by_key(|r| r.compressed_size);
        log::info!(
            "[Compare] {} bytes, baseline {} bytes, best {}",
            data.len(),
            baseline_size,
            records.first().map_or("none", |r| r.codec.name())
        );

        Ok(TransformComparison {
            original_size: data.len(),
            baseline_size,
            records,
        })
    }
}
