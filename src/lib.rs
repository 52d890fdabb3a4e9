//! This file is the root of the `strata` crate: an adaptive, multi-stage,
//! reversible text-transform compression pipeline.
//!
//! A run repeatedly analyzes its current bytes, picks one of the reversible
//! transforms in `kernels` (BWT, frequency grouping, run-length, sort with
//! permutation, pattern-cycle folding, move-to-front), compresses the result
//! with an external compressor, and keeps going while the output shrinks. The
//! recorded chain in the resulting `CompressionArtifact` inverts the whole run.
//!
//! ```no_run
//! use std::sync::Arc;
//! use strata::{CompressionPipeline, StrataConfig};
//!
//! let pipeline = CompressionPipeline::from_config(Arc::new(StrataConfig::default()));
//! let report = pipeline.run(b"abababababababab", 4).unwrap();
//! assert_eq!(pipeline.decompress(&report.artifact).unwrap(), b"abababababababab");
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod config;
pub mod error;
pub mod kernels;
pub mod logging;
pub mod pipeline;
pub mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::StrataConfig;
pub use error::StrataError;
pub use pipeline::{
    CodecId, CodecRegistry, CompressionArtifact, CompressionPipeline, ExplorationBudget,
    ExternalCompressor, PipelineReport, StopReason, TransformCodec, TransformComparison,
    ZstdCompressor,
};
