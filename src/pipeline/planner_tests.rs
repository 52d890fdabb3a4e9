use crate::config::SelectionStrategy;
use crate::pipeline::models::CodecId;
use crate::pipeline::planner::{select, select_with};
use crate::pipeline::profiler::{analyze, AnalysisReport};
use crate::types::text::{bytes_to_symbols, symbols_from_str};
use crate::types::DataType;

// Test Helpers
/// Starts from a real report and overrides the fields the policy reads.
fn report_with(longest_run: usize, distinct_symbols: usize, entropy: f64) -> AnalysisReport {
    let mut report = analyze(&symbols_from_str("placeholder"));
    report.longest_run = longest_run;
    report.distinct_symbols = distinct_symbols;
    report.entropy = entropy;
    report
}

#[test]
fn test_run_length_has_top_priority() {
    assert_eq!(select(&report_with(4, 2, 0.5)), CodecId::RunLength);
    assert_eq!(select(&analyze(&symbols_from_str("abcccccd"))), CodecId::RunLength);
}

#[test]
fn test_small_alphabet_selects_frequency_group() {
    assert_eq!(select(&report_with(3, 16, 3.9)), CodecId::FrequencyGroup);
    assert_eq!(select(&analyze(&symbols_from_str("abcabcabba"))), CodecId::FrequencyGroup);
}

#[test]
fn test_low_entropy_selects_sort() {
    assert_eq!(select(&report_with(1, 17, 3.99)), CodecId::Sort);
}

#[test]
fn test_fallthrough_selects_pattern_cycle() {
    assert_eq!(select(&report_with(1, 17, 4.0)), CodecId::PatternCycle);
    let all_bytes: Vec<u8> = (0..=255).collect();
    assert_eq!(select(&analyze(&bytes_to_symbols(&all_bytes))), CodecId::PatternCycle);
}

#[test]
fn test_selection_is_deterministic() {
    let report = analyze(&symbols_from_str("the quick brown fox jumps over the lazy dog"));
    let first = select(&report);
    for cycle in 1..10 {
        assert_eq!(select_with(SelectionStrategy::Analysis, &report, cycle), first);
    }
}

#[test]
fn test_cycle_index_schedule() {
    let low = report_with(1, 20, 2.0);
    let high = report_with(1, 20, 6.0);
    assert_eq!(select_with(SelectionStrategy::CycleIndex, &low, 4), CodecId::FrequencyGroup);
    assert_eq!(select_with(SelectionStrategy::CycleIndex, &low, 1), CodecId::Bwt);
    assert_eq!(select_with(SelectionStrategy::CycleIndex, &low, 2), CodecId::RunLength);
    assert_eq!(select_with(SelectionStrategy::CycleIndex, &high, 6), CodecId::Sort);
    assert_eq!(select_with(SelectionStrategy::CycleIndex, &high, 3), CodecId::PatternCycle);
}

#[test]
fn test_data_type_policy() {
    let strategy = SelectionStrategy::DataType;

    let base64 = analyze(&symbols_from_str("SGVsbG8="));
    assert_eq!(base64.data_type, DataType::Base64);
    assert_eq!(select_with(strategy, &base64, 1), CodecId::Bwt);

    let repetitive = analyze(&symbols_from_str("QUJDQUJDQUJDQUJD"));
    assert!(!repetitive.repeated_substrings.is_empty());
    assert_eq!(select_with(strategy, &repetitive, 1), CodecId::PatternCycle);

    let mut wide = base64.clone();
    wide.entropy = 5.0;
    assert_eq!(select_with(strategy, &wide, 1), CodecId::FrequencyGroup);

    let spaced = analyze(&symbols_from_str("a b c d e f"));
    assert_eq!(spaced.data_type, DataType::Text);
    assert_eq!(select_with(strategy, &spaced, 1), CodecId::RunLength);

    let even = analyze(&symbols_from_str("Quick fox!"));
    assert_eq!(select_with(strategy, &even, 1), CodecId::Sort);

    let binary = analyze(&[0, 1, 2, 200, 201, 202, 3, 4, 5, 6]);
    assert_eq!(binary.data_type, DataType::Binary);
    assert_eq!(select_with(strategy, &binary, 1), CodecId::MoveToFront);
}
