use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::StrataConfig;
use crate::error::StrataError;
use crate::pipeline::compressor::ZstdCompressor;
use crate::pipeline::explore::ExplorationBudget;
use crate::pipeline::orchestrator::CompressionPipeline;
use crate::pipeline::registry::CodecRegistry;
use crate::pipeline::report::StopReason;

fn generous_budget(max_cycles: usize) -> ExplorationBudget {
    ExplorationBudget {
        max_duration: Duration::from_secs(600),
        max_cycles,
    }
}

#[test]
fn test_same_seed_gives_same_run() {
    let pipeline = CompressionPipeline::default();
    let data = "to be or not to be, that is the question. ".repeat(20).into_bytes();
    let budget = generous_budget(6);

    let first = pipeline
        .explore(&data, &budget, &mut StdRng::seed_from_u64(1234))
        .unwrap();
    let second = pipeline
        .explore(&data, &budget, &mut StdRng::seed_from_u64(1234))
        .unwrap();

    assert_eq!(first.artifact, second.artifact);
    assert_eq!(first.history, second.history);
    assert_eq!(first.stop_reason, StopReason::MaxCycles);
    assert_eq!(first.history.len(), 6);
    assert_eq!(pipeline.decompress(&first.artifact).unwrap(), data);
}

#[test]
fn test_accepted_cycles_strictly_shrink_their_input() {
    let pipeline = CompressionPipeline::default();
    let data = "0101011100101010".repeat(40).into_bytes();

    let report = pipeline
        .explore(&data, &generous_budget(8), &mut StdRng::seed_from_u64(99))
        .unwrap();

    for record in report.history.iter().filter(|r| r.accepted) {
        assert!(record.compressed_size < record.input_size);
    }
    assert_eq!(report.accepted_cycles(), report.artifact.chain.len());
    assert_eq!(pipeline.decompress(&report.artifact).unwrap(), data);
}

#[test]
fn test_exhausted_time_budget_stops_before_first_cycle() {
    let pipeline = CompressionPipeline::default();
    let budget = ExplorationBudget {
        max_duration: Duration::ZERO,
        max_cycles: 10,
    };

    let report = pipeline
        .explore(b"abcabcabc", &budget, &mut StdRng::seed_from_u64(0))
        .unwrap();

    assert_eq!(report.stop_reason, StopReason::BudgetExhausted);
    assert!(report.history.is_empty());
    assert_eq!(report.artifact.compressed_bytes, b"abcabcabc");
}

#[test]
fn test_exploration_needs_a_transform() {
    let pipeline = CompressionPipeline::new(
        Arc::new(StrataConfig::default()),
        CodecRegistry::empty(),
        Box::new(ZstdCompressor::default()),
    );

    let result = pipeline.explore(b"data", &ExplorationBudget::default(), &mut StdRng::seed_from_u64(0));

    assert!(matches!(result, Err(StrataError::ConfigError(_))));
}
