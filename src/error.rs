// In: src/error.rs

//! This module defines the single, unified error type for the entire strata library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

use crate::pipeline::models::CodecId;

#[derive(Error, Debug)]
pub enum StrataError {
    // =========================================================================
    // === Codec Errors (encode-side rejections and decode-side corruption)
    // =========================================================================
    /// A self-describing frame could not be parsed back into its input.
    #[error("Malformed {codec} frame: {reason}")]
    MalformedFrame { codec: CodecId, reason: String },

    /// The selector or a recorded chain named a codec absent from the registry.
    #[error("Codec {0} is not registered")]
    CodecUnavailable(CodecId),

    #[error("{codec} cannot encode {len} symbols (limit is {max})")]
    InputTooLong {
        codec: CodecId,
        len: usize,
        max: usize,
    },

    #[error("Symbol {symbol} is outside the supported range 0..={max}")]
    SymbolOutOfRange { symbol: u16, max: u16 },

    // =========================================================================
    // === Framing & Kernel Errors
    // =========================================================================
    #[error("Artifact serialization/deserialization failed: {0}")]
    FrameFormatError(String),

    #[error("Zstd operation failed: {0}")]
    ZstdError(String),

    #[error("LEB128 decoding error: {0}")]
    Leb128DecodeError(String),

    #[error("Pipeline execution failed at stage '{stage}': {source}")]
    PipelineError {
        stage: String,
        #[source]
        source: Box<StrataError>,
    },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g. the log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during chain/config serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl StrataError {
    /// Shorthand used by every codec decoder.
    pub(crate) fn malformed(codec: CodecId, reason: impl Into<String>) -> Self {
        StrataError::MalformedFrame {
            codec,
            reason: reason.into(),
        }
    }

    /// Wraps an error with the pipeline stage it surfaced in.
    pub(crate) fn at_stage(self, stage: impl Into<String>) -> Self {
        StrataError::PipelineError {
            stage: stage.into(),
            source: Box::new(self),
        }
    }
}
