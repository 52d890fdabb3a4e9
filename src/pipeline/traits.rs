// In: src/pipeline/traits.rs

//! The behavioral contract shared by every transform codec.
//!
//! The pipeline never calls a kernel directly; it looks a `TransformCodec` up in
//! the `CodecRegistry` it was constructed with. Built-in codecs are thin
//! wrappers over `kernels::dispatch_*`, and tests may register their own.

use crate::error::StrataError;
use crate::kernels::{self, KernelOptions};
use crate::pipeline::models::{CodecId, CodecParams, Encoded};
use crate::types::Symbol;

/// A pure, invertible transform over symbol texts.
///
/// Implementations must satisfy `decode(encode(x).output, encode(x).params) == x`
/// for every input `encode` accepts. Encoders may reject inputs outside their
/// domain; decoders must reject corrupt frames with an error rather than panic.
pub trait TransformCodec: Send + Sync {
    fn id(&self) -> CodecId;

    fn encode(&self, input: &[Symbol]) -> Result<Encoded, StrataError>;

    fn decode(&self, output: &[Symbol], params: &CodecParams) -> Result<Vec<Symbol>, StrataError>;
}

/// One of the kernels in `crate::kernels`.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCodec {
    id: CodecId,
    options: KernelOptions,
}

impl BuiltinCodec {
    pub fn new(id: CodecId, options: KernelOptions) -> Self {
        Self { id, options }
    }
}

impl TransformCodec for BuiltinCodec {
    fn id(&self) -> CodecId {
        self.id
    }

    fn encode(&self, input: &[Symbol]) -> Result<Encoded, StrataError> {
        kernels::dispatch_encode(self.id, input, &self.options)
    }

    fn decode(&self, output: &[Symbol], params: &CodecParams) -> Result<Vec<Symbol>, StrataError> {
        kernels::dispatch_decode(self.id, output, params)
    }
}
