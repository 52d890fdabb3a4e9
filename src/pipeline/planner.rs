// In: src/pipeline/planner.rs

//! The transform selector.
//!
//! This module maps an `AnalysisReport` to the codec the next pipeline cycle
//! should apply. Every policy is total and deterministic: the same report (and
//! cycle number) always yields the same codec.
//!
//! The default `Analysis` policy checks, in priority order:
//! 1. a run of at least four identical symbols selects run-length coding,
//! 2. an alphabet of at most sixteen symbols selects frequency grouping,
//! 3. entropy under four bits per symbol selects sort-with-permutation,
//! 4. anything else falls through to pattern-cycle folding.

use crate::config::SelectionStrategy;
use crate::pipeline::models::CodecId;
use crate::pipeline::profiler::AnalysisReport;
use crate::types::DataType;

const RUN_LENGTH_MIN_RUN: usize = 4;
const FREQUENCY_GROUP_MAX_DISTINCT: usize = 16;
const SORT_MAX_ENTROPY: f64 = 4.0;

/// `CycleIndex` schedule: low-entropy inputs in slot 2 prefer run-length.
const CYCLE_INDEX_RLE_MAX_ENTROPY: f64 = 3.0;
/// `DataType` policy: high-entropy Base64 prefers frequency grouping.
const BASE64_FREQ_MIN_ENTROPY: f64 = 4.5;
/// `DataType` policy: text dominated by one symbol prefers run-length.
const TEXT_RLE_MIN_TOP_SHARE: f64 = 0.2;

/// The canonical selection policy.
pub fn select(report: &AnalysisReport) -> CodecId {
    if report.longest_run >= RUN_LENGTH_MIN_RUN {
        CodecId::RunLength
    } else if report.distinct_symbols <= FREQUENCY_GROUP_MAX_DISTINCT {
        CodecId::FrequencyGroup
    } else if report.entropy < SORT_MAX_ENTROPY {
        CodecId::Sort
    } else {
        CodecId::PatternCycle
    }
}

/// Dispatches to the configured policy. `cycle` is the 1-based cycle number.
pub fn select_with(strategy: SelectionStrategy, report: &AnalysisReport, cycle: usize) -> CodecId {
    let codec = match strategy {
        SelectionStrategy::Analysis => select(report),
        SelectionStrategy::CycleIndex => select_by_cycle(report, cycle),
        SelectionStrategy::DataType => select_by_data_type(report),
    };
    log::info!(
        "[Selector] cycle {} strategy={:?} type={} run={} distinct={} entropy={:.3} -> {}",
        cycle,
        strategy,
        report.data_type,
        report.longest_run,
        report.distinct_symbols,
        report.entropy,
        codec
    );
    codec
}

fn select_by_cycle(report: &AnalysisReport, cycle: usize) -> CodecId {
    match cycle % 4 {
        0 => CodecId::FrequencyGroup,
        1 => CodecId::Bwt,
        2 if report.entropy < CYCLE_INDEX_RLE_MAX_ENTROPY => CodecId::RunLength,
        2 => CodecId::Sort,
        _ => CodecId::PatternCycle,
    }
}

fn select_by_data_type(report: &AnalysisReport) -> CodecId {
    match report.data_type {
        DataType::Base64 if report.entropy > BASE64_FREQ_MIN_ENTROPY => CodecId::FrequencyGroup,
        DataType::Base64 if !report.repeated_substrings.is_empty() => CodecId::PatternCycle,
        DataType::Base64 => CodecId::Bwt,
        DataType::Text if report.top_symbol_share() > TEXT_RLE_MIN_TOP_SHARE => CodecId::RunLength,
        DataType::Text => CodecId::Sort,
        DataType::Binary => CodecId::MoveToFront,
    }
}
