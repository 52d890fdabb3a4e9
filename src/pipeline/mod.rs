//! This module contains the adaptive compression pipeline.
//!
//! It is composed of several sub-modules, each with a distinct responsibility:
//! - `profiler`: The statistical analyzer that turns a text into an `AnalysisReport`.
//! - `planner`: The selector that maps a report to the next codec.
//! - `registry` / `traits`: The codec contract and the explicit lookup table.
//! - `compressor`: The external byte compressor at the tail of each cycle.
//! - `orchestrator`: The cycle loop and its inverse.
//! - `explore`: The seeded random-codec loop under a time budget.
//! - `compare`: One cycle of every transform, ranked against the untransformed baseline.
//! - `artifact`: The self-describing byte format of a finished run.

pub mod artifact;
pub mod compare;
pub mod compressor;
pub mod explore;
pub mod models;
pub mod orchestrator;
pub mod planner;
pub mod profiler;
pub mod registry;
pub mod report;
pub mod traits;

//==================================================================================
// Public API Re-exports
//==================================================================================

pub use self::artifact::{CompressionArtifact, HeaderInfo};
pub use self::compare::{ComparisonRecord, TransformComparison};
pub use self::compressor::{ExternalCompressor, ZstdCompressor};
pub use self::explore::ExplorationBudget;
pub use self::models::{ChainEntry, CodecId, CodecParams, Encoded};
pub use self::orchestrator::CompressionPipeline;
pub use self::profiler::{analyze, AnalysisReport, RepeatedSubstring};
pub use self::registry::CodecRegistry;
pub use self::report::{CycleRecord, PipelineReport, StopReason};
pub use self::traits::TransformCodec;

#[cfg(test)]
mod explore_tests;
#[cfg(test)]
mod orchestrator_tests;
#[cfg(test)]
mod planner_tests;
