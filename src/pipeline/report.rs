// In: src/pipeline/report.rs

//! Per-run diagnostics: the cycle history and why the run stopped.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

use crate::pipeline::artifact::CompressionArtifact;
use crate::pipeline::models::CodecId;
use crate::types::DataType;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A cycle failed to shrink the previous cycle's output.
    NoImprovement,
    MaxCycles,
    /// The last accepted output fell below the configured size floor.
    SizeFloor,
    /// The exploratory wall-clock budget ran out.
    BudgetExhausted,
}

/// One attempted cycle. Rejected cycles are kept here but never enter the chain.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub cycle: usize,
    /// The codec actually applied (passthrough if the selected one refused).
    pub codec: CodecId,
    pub data_type: DataType,
    pub entropy: f64,
    pub input_size: usize,
    pub transformed_symbols: usize,
    pub compressed_size: usize,
    pub accepted: bool,
}

impl CycleRecord {
    /// Compressed size relative to this cycle's input.
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            return 1.0;
        }
        self.compressed_size as f64 / self.input_size as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub artifact: CompressionArtifact,
    pub history: Vec<CycleRecord>,
    pub stop_reason: StopReason,
}

impl PipelineReport {
    pub fn original_size(&self) -> usize {
        self.artifact.original_len as usize
    }

    pub fn final_size(&self) -> usize {
        self.artifact.compressed_len()
    }

    /// Final size relative to the original; `1.0` for empty input.
    pub fn overall_ratio(&self) -> f64 {
        if self.original_size() == 0 {
            return 1.0;
        }
        self.final_size() as f64 / self.original_size() as f64
    }

    pub fn accepted_cycles(&self) -> usize {
        self.history.iter().filter(|r| r.accepted).count()
    }

    /// A human-readable per-cycle table.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>5}  {:<5} {:<7} {:>7} {:>10} {:>10} {:>7}  status",
            "cycle", "codec", "type", "entropy", "in", "out", "ratio"
        );
        for r in &self.history {
            let status = if r.accepted {
                "IMPROVED".green()
            } else {
                "REJECTED".red()
            };
            let _ = writeln!(
                out,
                "{:>5}  {:<5} {:<7} {:>7.3} {:>10} {:>10} {:>7.3}  {}",
                r.cycle,
                r.codec.name(),
                r.data_type.to_string(),
                r.entropy,
                r.input_size,
                r.compressed_size,
                r.ratio(),
                status
            );
        }
        let _ = writeln!(
            out,
            "{} {} -> {} bytes ({:.3}) after {} accepted cycle(s), stopped: {:?}",
            "total".bold(),
            self.original_size(),
            self.final_size(),
            self.overall_ratio(),
            self.accepted_cycles(),
            self.stop_reason
        );
        out
    }
}
