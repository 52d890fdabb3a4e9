// In: src/pipeline/orchestrator.rs

//! The iterative compression pipeline.
//!
//! Each cycle runs analyze -> select -> encode -> serialize -> external
//! compress over the previous cycle's compressed bytes. The first cycle is
//! always accepted; later cycles are accepted only when they strictly shrink
//! the output. A rejected cycle is kept in the history but not in the chain.
//!
//! Decompression is a "dumb engine": it walks the recorded chain back to front,
//! undoing the external compressor and then the codec for every entry. It
//! makes no decisions of its own.

use std::sync::Arc;

use crate::config::StrataConfig;
use crate::error::StrataError;
use crate::pipeline::artifact::CompressionArtifact;
use crate::pipeline::compressor::{ExternalCompressor, ZstdCompressor};
use crate::pipeline::models::{ChainEntry, CodecId, Encoded};
use crate::pipeline::profiler::{self, AnalysisReport};
use crate::pipeline::planner;
use crate::pipeline::registry::CodecRegistry;
use crate::pipeline::report::{CycleRecord, PipelineReport, StopReason};
use crate::types::text::{bytes_to_symbols, deserialize_symbols, serialize_symbols, symbols_to_bytes};
use crate::types::Symbol;

//==================================================================================
// 1. Run State
//==================================================================================

/// The outcome of applying one codec and the external compressor.
pub(crate) struct CycleAttempt {
    pub entry: ChainEntry,
    pub transformed_symbols: usize,
    pub compressed: Vec<u8>,
}

/// Exclusively owned by one run and consumed into its report.
pub(crate) struct PipelineState {
    pub current: Vec<u8>,
    pub best_size: Option<usize>,
    pub cycle: usize,
    history: Vec<CycleRecord>,
    chain: Vec<ChainEntry>,
    original_len: usize,
}

impl PipelineState {
    pub fn new(data: &[u8]) -> Self {
        Self {
            current: data.to_vec(),
            best_size: None,
            cycle: 0,
            history: Vec::new(),
            chain: Vec::new(),
            original_len: data.len(),
        }
    }

    /// Appends the history entry for `attempt` and advances the cycle counter.
    pub fn record(&mut self, report: &AnalysisReport, attempt: &CycleAttempt, accepted: bool) {
        self.cycle += 1;
        self.history.push(CycleRecord {
            cycle: self.cycle,
            codec: attempt.entry.codec,
            data_type: report.data_type,
            entropy: report.entropy,
            input_size: self.current.len(),
            transformed_symbols: attempt.transformed_symbols,
            compressed_size: attempt.compressed.len(),
            accepted,
        });
    }

    pub fn accept(&mut self, attempt: CycleAttempt) {
        self.best_size = Some(attempt.compressed.len());
        self.chain.push(attempt.entry);
        self.current = attempt.compressed;
    }

    pub fn into_report(self, compressor: &str, stop_reason: StopReason) -> PipelineReport {
        PipelineReport {
            artifact: CompressionArtifact {
                original_len: self.original_len as u64,
                compressor: compressor.to_string(),
                chain: self.chain,
                compressed_bytes: self.current,
            },
            history: self.history,
            stop_reason,
        }
    }
}

//==================================================================================
// 2. The Pipeline
//==================================================================================

pub struct CompressionPipeline {
    config: Arc<StrataConfig>,
    registry: CodecRegistry,
    compressor: Box<dyn ExternalCompressor>,
}

impl CompressionPipeline {
    pub fn new(
        config: Arc<StrataConfig>,
        registry: CodecRegistry,
        compressor: Box<dyn ExternalCompressor>,
    ) -> Self {
        Self {
            config,
            registry,
            compressor,
        }
    }

    /// Every built-in codec and a Zstd compressor at the profile's level.
    pub fn from_config(config: Arc<StrataConfig>) -> Self {
        let registry = CodecRegistry::from_config(&config);
        let compressor = Box::new(ZstdCompressor::from_config(&config));
        Self::new(config, registry, compressor)
    }

    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn compressor_name(&self) -> &'static str {
        self.compressor.name()
    }

    /// Runs the configured number of cycles and returns the artifact only.
    pub fn compress(&self, data: &[u8]) -> Result<CompressionArtifact, StrataError> {
        self.run_pipeline(data, self.config.max_cycles)
    }

    pub fn run_pipeline(
        &self,
        data: &[u8],
        max_cycles: usize,
    ) -> Result<CompressionArtifact, StrataError> {
        Ok(self.run(data, max_cycles)?.artifact)
    }

    /// Runs up to `max_cycles` cycles and returns the artifact with its history.
    pub fn run(&self, data: &[u8], max_cycles: usize) -> Result<PipelineReport, StrataError> {
        let mut state = PipelineState::new(data);

        let stop_reason = loop {
            if state.cycle >= max_cycles {
                break StopReason::MaxCycles;
            }
            let symbols = bytes_to_symbols(&state.current);
            let report = profiler::analyze_with(&symbols, &self.config.analyzer);
            let selected = planner::select_with(self.config.selection, &report, state.cycle + 1);
            let attempt = self.apply_codec(selected, &symbols)?;

            let size = attempt.compressed.len();
            let improved = state.best_size.map_or(true, |best| size < best);
            state.record(&report, &attempt, improved);
            log_metric!(
                "event" = "cycle",
                "cycle" = state.cycle,
                "codec" = attempt.entry.codec,
                "input" = state.current.len(),
                "output" = size,
                "accepted" = improved
            );

            if !improved {
                log::info!(
                    "[Pipeline] cycle {}: {} bytes does not beat {}; stopping",
                    state.cycle,
                    size,
                    state.current.len()
                );
                break StopReason::NoImprovement;
            }
            state.accept(attempt);
            if size < self.config.size_floor {
                break StopReason::SizeFloor;
            }
        };

        log::info!(
            "[Pipeline] {} -> {} bytes in {} cycle(s), stopped: {:?}",
            data.len(),
            state.current.len(),
            state.cycle,
            stop_reason
        );
        Ok(state.into_report(self.compressor.name(), stop_reason))
    }

    /// Encodes `symbols` with `codec` (falling back to passthrough if the codec
    /// refuses the input) and compresses the serialized result.
    pub(crate) fn apply_codec(
        &self,
        codec: CodecId,
        symbols: &[Symbol],
    ) -> Result<CycleAttempt, StrataError> {
        let transform = self.registry.get(codec)?;
        let (codec, encoded) = match transform.encode(symbols) {
            Ok(encoded) => (codec, encoded),
            Err(e) => {
                log::warn!(
                    "[Pipeline] {} rejected its input ({}); using passthrough for this cycle",
                    codec,
                    e
                );
                (CodecId::Passthrough, Encoded::framed(symbols.to_vec()))
            }
        };

        let wire = serialize_symbols(&encoded.output)?;
        let compressed = self.compressor.compress(&wire)?;
        Ok(CycleAttempt {
            entry: ChainEntry {
                codec,
                params: encoded.params,
            },
            transformed_symbols: encoded.output.len(),
            compressed,
        })
    }

    /// Replays the artifact's chain in reverse to recover the original bytes.
    pub fn decompress(&self, artifact: &CompressionArtifact) -> Result<Vec<u8>, StrataError> {
        if !artifact.chain.is_empty() && artifact.compressor != self.compressor.name() {
            return Err(StrataError::FrameFormatError(format!(
                "Artifact was compressed with '{}', this pipeline uses '{}'",
                artifact.compressor,
                self.compressor.name()
            )));
        }

        let mut bytes = artifact.compressed_bytes.clone();
        for (i, entry) in artifact.chain.iter().enumerate().rev() {
            bytes = self
                .invert_entry(entry, &bytes)
                .map_err(|e| e.at_stage(format!("cycle {} ({})", i + 1, entry.codec)))?;
        }

        if bytes.len() as u64 != artifact.original_len {
            return Err(StrataError::FrameFormatError(format!(
                "Decoded {} bytes, artifact declares {}",
                bytes.len(),
                artifact.original_len
            )));
        }
        Ok(bytes)
    }

    pub(crate) fn invert_entry(
        &self,
        entry: &ChainEntry,
        bytes: &[u8],
    ) -> Result<Vec<u8>, StrataError> {
        let wire = self.compressor.decompress(bytes)?;
        let symbols = deserialize_symbols(&wire)?;
        let decoded = self.registry.get(entry.codec)?.decode(&symbols, &entry.params)?;
        symbols_to_bytes(&decoded)
    }
}

impl Default for CompressionPipeline {
    fn default() -> Self {
        Self::from_config(Arc::new(StrataConfig::default()))
    }
}
