//! This module defines the core, strongly-typed data representations used
//! throughout the strata pipeline.
//!
//! It includes the `Symbol` text model (with its byte and wire conversions)
//! and the coarse `DataType` classification produced by the analyzer.

pub mod data_type;
pub mod text;

// Re-export the main type(s) for easier access.
pub use data_type::DataType;
pub use text::Symbol;
