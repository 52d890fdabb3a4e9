// In: src/pipeline/explore.rs

//! Exploratory mode: random codec choice under a time budget.
//!
//! Instead of consulting the planner, every cycle draws a codec uniformly from
//! the registry using the caller's RNG. A cycle is kept only if it makes its
//! input strictly smaller; otherwise it is logged as rejected and the loop
//! tries again from the same bytes. The wall-clock budget is checked between
//! cycles, never inside one.

use rand::Rng;
use std::time::{Duration, Instant};

use crate::error::StrataError;
use crate::pipeline::orchestrator::{CompressionPipeline, PipelineState};
use crate::pipeline::profiler;
use crate::pipeline::report::{PipelineReport, StopReason};
use crate::types::text::bytes_to_symbols;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorationBudget {
    pub max_duration: Duration,
    /// Upper bound on attempted (not accepted) cycles.
    pub max_cycles: usize,
}

impl Default for ExplorationBudget {
    fn default() -> Self {
        Self {
            max_duration: Duration::from_secs(2),
            max_cycles: 64,
        }
    }
}

impl CompressionPipeline {
    /// Runs the exploratory loop. The result is deterministic for a given RNG
    /// seed as long as `budget.max_cycles` is reached before the time budget.
    pub fn explore<R: Rng>(
        &self,
        data: &[u8],
        budget: &ExplorationBudget,
        rng: &mut R,
    ) -> Result<PipelineReport, StrataError> {
        let candidates = self.registry().transforms();
        if candidates.is_empty() {
            return Err(StrataError::ConfigError(
                "exploration needs at least one registered transform".to_string(),
            ));
        }

        let started = Instant::now();
        let mut state = PipelineState::new(data);

        let stop_reason = loop {
            if state.cycle >= budget.max_cycles {
                break StopReason::MaxCycles;
            }
            if started.elapsed() >= budget.max_duration {
                break StopReason::BudgetExhausted;
            }

            let codec = candidates[rng.random_range(0..candidates.len())];
            let symbols = bytes_to_symbols(&state.current);
            let report = profiler::analyze_with(&symbols, &self.config().analyzer);
            let attempt = self.apply_codec(codec, &symbols)?;

            let accepted = attempt.compressed.len() < state.current.len();
            state.record(&report, &attempt, accepted);
            log::info!(
                "[Explore] cycle {}: {} {} -> {} bytes{}",
                state.cycle,
                attempt.entry.codec,
                state.current.len(),
                attempt.compressed.len(),
                if accepted { "" } else { " (rejected)" }
            );
            if accepted {
                state.accept(attempt);
            }
        };

        Ok(state.into_report(self.compressor_name(), stop_reason))
    }
}
