use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{SelectionStrategy, StrataConfig};
use crate::error::StrataError;
use crate::pipeline::artifact::CompressionArtifact;
use crate::pipeline::compressor::{ExternalCompressor, ZstdCompressor};
use crate::pipeline::models::{CodecId, CodecParams, Encoded};
use crate::pipeline::orchestrator::CompressionPipeline;
use crate::pipeline::registry::CodecRegistry;
use crate::pipeline::report::StopReason;
use crate::pipeline::traits::TransformCodec;
use crate::types::Symbol;

// Test Helpers

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random::<u8>()).collect()
}

fn pipeline_with(selection: SelectionStrategy) -> CompressionPipeline {
    let config = StrataConfig {
        selection,
        ..Default::default()
    };
    CompressionPipeline::from_config(Arc::new(config))
}

fn pipeline_with_registry(registry: CodecRegistry) -> CompressionPipeline {
    CompressionPipeline::new(
        Arc::new(StrataConfig::default()),
        registry,
        Box::new(ZstdCompressor::default()),
    )
}

/// Runs `data` through `pipeline` and asserts the artifact inverts exactly.
fn roundtrip_and_verify(pipeline: &CompressionPipeline, data: &[u8], max_cycles: usize) {
    let report = pipeline.run(data, max_cycles).unwrap();
    assert!(report.artifact.chain.len() <= max_cycles);
    let restored = pipeline.decompress(&report.artifact).unwrap();
    assert_eq!(restored, data, "roundtrip mismatch");
}

/// Reverses its input; registered in place of a built-in id.
struct ReversingCodec(CodecId);

impl TransformCodec for ReversingCodec {
    fn id(&self) -> CodecId {
        self.0
    }

    fn encode(&self, input: &[Symbol]) -> Result<Encoded, StrataError> {
        Ok(Encoded::framed(input.iter().rev().copied().collect()))
    }

    fn decode(&self, output: &[Symbol], _params: &CodecParams) -> Result<Vec<Symbol>, StrataError> {
        Ok(output.iter().rev().copied().collect())
    }
}

/// Refuses every input.
struct RefusingCodec(CodecId);

impl TransformCodec for RefusingCodec {
    fn id(&self) -> CodecId {
        self.0
    }

    fn encode(&self, _input: &[Symbol]) -> Result<Encoded, StrataError> {
        Err(StrataError::InternalError("refused".to_string()))
    }

    fn decode(&self, _output: &[Symbol], _params: &CodecParams) -> Result<Vec<Symbol>, StrataError> {
        Err(StrataError::InternalError("refused".to_string()))
    }
}

/// Copies bytes through unchanged.
struct StoredCompressor;

impl ExternalCompressor for StoredCompressor {
    fn name(&self) -> &'static str {
        "stored"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, StrataError> {
        Ok(bytes.to_vec())
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>, StrataError> {
        Ok(bytes.to_vec())
    }
}

//==================================================================================
// Roundtrip Tests
//==================================================================================

#[test]
fn test_roundtrip_on_varied_inputs_for_every_strategy() {
    let repeated_text = "the quick brown fox jumps over the lazy dog. ".repeat(20);
    let base64_like = "QUJDREVGR0hJSktMTU5PUFFSU1RVVldYWVo=".repeat(12);
    let all_bytes: Vec<u8> = (0..=255u8).collect();
    let inputs: Vec<Vec<u8>> = vec![
        repeated_text.into_bytes(),
        base64_like.into_bytes(),
        random_bytes(1500, 7),
        all_bytes,
        b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaabbbbbbbbbbbbbbbbbbbbb".to_vec(),
        b"x".to_vec(),
        Vec::new(),
    ];

    for strategy in [
        SelectionStrategy::Analysis,
        SelectionStrategy::CycleIndex,
        SelectionStrategy::DataType,
    ] {
        let pipeline = pipeline_with(strategy);
        for data in &inputs {
            roundtrip_and_verify(&pipeline, data, 4);
        }
    }
}

#[test]
fn test_artifact_bytes_roundtrip_through_decompress() {
    let pipeline = CompressionPipeline::default();
    let data = "ABABABABCDCDCDCD-ABABABABCDCDCDCD\n".repeat(30).into_bytes();

    let artifact = pipeline.compress(&data).unwrap();
    let bytes = artifact.to_bytes().unwrap();
    let parsed = CompressionArtifact::from_bytes(&bytes).unwrap();

    assert_eq!(parsed, artifact);
    assert_eq!(pipeline.decompress(&parsed).unwrap(), data);
}

//==================================================================================
// Cycle Control Tests
//==================================================================================

#[test]
fn test_incompressible_input_stops_after_first_rejection() {
    let pipeline = CompressionPipeline::default();
    let data = random_bytes(4096, 42);

    let report = pipeline.run(&data, 8).unwrap();

    assert_eq!(report.stop_reason, StopReason::NoImprovement);
    assert_eq!(report.artifact.chain.len(), 1);
    assert_eq!(report.history.len(), 2);
    assert!(report.history[0].accepted);
    assert!(!report.history[1].accepted);
    assert_eq!(report.final_size(), report.history[0].compressed_size);
    assert_eq!(pipeline.decompress(&report.artifact).unwrap(), data);
}

#[test]
fn test_accepted_sizes_strictly_decrease() {
    let pipeline = pipeline_with(SelectionStrategy::CycleIndex);
    let data = "abcabcabcabcxyzxyzxyz 0123456789 ".repeat(40).into_bytes();

    let report = pipeline.run(&data, 6).unwrap();
    let accepted: Vec<usize> = report
        .history
        .iter()
        .filter(|r| r.accepted)
        .map(|r| r.compressed_size)
        .collect();

    assert_eq!(accepted.len(), report.artifact.chain.len());
    assert!(accepted.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_zero_cycles_returns_input_unchanged() {
    let pipeline = CompressionPipeline::default();
    let data = b"nothing to do here".to_vec();

    let report = pipeline.run(&data, 0).unwrap();

    assert_eq!(report.stop_reason, StopReason::MaxCycles);
    assert!(report.artifact.chain.is_empty());
    assert!(report.history.is_empty());
    assert_eq!(report.artifact.compressed_bytes, data);
    assert_eq!(pipeline.decompress(&report.artifact).unwrap(), data);
}

#[test]
fn test_small_output_stops_at_size_floor() {
    let pipeline = CompressionPipeline::default();
    let data = "ab".repeat(500).into_bytes();

    let report = pipeline.run(&data, 8).unwrap();

    assert_eq!(report.stop_reason, StopReason::SizeFloor);
    assert_eq!(report.artifact.chain.len(), 1);
    assert!(report.final_size() < 100);
    assert_eq!(pipeline.decompress(&report.artifact).unwrap(), data);
}

//==================================================================================
// Registry Tests
//==================================================================================

#[test]
fn test_custom_codec_is_used_and_inverted() {
    let mut registry = CodecRegistry::standard();
    registry.register(Arc::new(ReversingCodec(CodecId::PatternCycle)));
    let pipeline = pipeline_with_registry(registry);
    // High-entropy bytes with short runs select the pattern-cycle slot.
    let data = random_bytes(2048, 3);

    let report = pipeline.run(&data, 1).unwrap();

    assert_eq!(report.artifact.chain[0].codec, CodecId::PatternCycle);
    assert_eq!(pipeline.decompress(&report.artifact).unwrap(), data);
}

#[test]
fn test_refused_input_falls_back_to_passthrough() {
    let mut registry = CodecRegistry::standard();
    registry.register(Arc::new(RefusingCodec(CodecId::PatternCycle)));
    let pipeline = pipeline_with_registry(registry);
    let data = random_bytes(2048, 3);

    let report = pipeline.run(&data, 1).unwrap();

    assert_eq!(report.history[0].codec, CodecId::Passthrough);
    assert_eq!(report.artifact.chain[0].codec, CodecId::Passthrough);
    assert_eq!(pipeline.decompress(&report.artifact).unwrap(), data);
}

#[test]
fn test_unregistered_selection_is_an_error() {
    let mut registry = CodecRegistry::standard();
    registry.unregister(CodecId::RunLength);
    let pipeline = pipeline_with_registry(registry);

    let result = pipeline.run(&[b'a'; 500], 3);

    assert!(matches!(
        result,
        Err(StrataError::CodecUnavailable(CodecId::RunLength))
    ));
}

//==================================================================================
// Decompression Failure Tests
//==================================================================================

#[test]
fn test_truncated_payload_reports_failing_stage() {
    let pipeline = CompressionPipeline::default();
    let data = random_bytes(1024, 11);
    let mut artifact = pipeline.compress(&data).unwrap();
    let keep = artifact.compressed_bytes.len() / 2;
    artifact.compressed_bytes.truncate(keep);

    match pipeline.decompress(&artifact) {
        Err(StrataError::PipelineError { stage, .. }) => {
            let last = artifact.chain.len();
            assert!(stage.starts_with(&format!("cycle {} (", last)), "stage: {}", stage);
        }
        other => panic!("expected a pipeline error, got {:?}", other),
    }
}

#[test]
fn test_foreign_compressor_is_rejected() {
    let pipeline = CompressionPipeline::default();
    let artifact = pipeline.compress(&random_bytes(512, 5)).unwrap();

    let other = CompressionPipeline::new(
        Arc::new(StrataConfig::default()),
        CodecRegistry::standard(),
        Box::new(StoredCompressor),
    );

    assert!(matches!(
        other.decompress(&artifact),
        Err(StrataError::FrameFormatError(_))
    ));
}

#[test]
fn test_declared_length_mismatch_is_rejected() {
    let pipeline = CompressionPipeline::default();
    let data = "mississippi ".repeat(16).into_bytes();
    let mut artifact = pipeline.compress(&data).unwrap();
    artifact.original_len += 1;

    assert!(matches!(
        pipeline.decompress(&artifact),
        Err(StrataError::FrameFormatError(_))
    ));
}

//==================================================================================
// Diagnostics Tests
//==================================================================================

#[test]
fn test_stored_compressor_history_matches_codec_output() {
    let pipeline = CompressionPipeline::new(
        Arc::new(StrataConfig::default()),
        CodecRegistry::standard(),
        Box::new(StoredCompressor),
    );
    let data = b"banana bandana cabana".to_vec();

    let report = pipeline.run(&data, 1).unwrap();
    let first = &report.history[0];

    assert_eq!(first.cycle, 1);
    assert_eq!(first.input_size, data.len());
    // Narrow wire: one mode byte plus one byte per symbol.
    assert_eq!(first.compressed_size, first.transformed_symbols + 1);
    assert_eq!(pipeline.decompress(&report.artifact).unwrap(), data);
}

#[test]
fn test_summary_lists_every_cycle() {
    let pipeline = CompressionPipeline::default();
    let report = pipeline.run(&random_bytes(1024, 9), 4).unwrap();
    let summary = report.summary();

    assert!(summary.contains("total"));
    assert_eq!(summary.lines().count(), report.history.len() + 2);
}
