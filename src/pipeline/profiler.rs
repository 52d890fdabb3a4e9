// In: src/pipeline/profiler.rs

//! The statistical analyzer.
//!
//! Produces an immutable `AnalysisReport` for a text: symbol frequencies,
//! longest run, distinct-symbol count, Shannon entropy, the ranked table of
//! repeated substrings, and a coarse `DataType` classification. The planner
//! reads nothing but this report.

use std::collections::HashMap;

use crate::config::AnalyzerConfig;
use crate::types::{DataType, Symbol};

/// Share of printable symbols (9 in 10) at or above which a non-Base64 text is `Text`.
const TEXT_PRINTABLE_TENTHS: (usize, usize) = (9, 10);

//==================================================================================
// 1. Report Types
//==================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedSubstring {
    pub pattern: Vec<Symbol>,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub frequencies: HashMap<Symbol, usize>,
    /// Count descending, ties by ascending symbol value.
    pub ranked_symbols: Vec<(Symbol, usize)>,
    pub total_symbols: usize,
    pub longest_run: usize,
    pub distinct_symbols: usize,
    /// Bits per symbol; `0.0` for empty and single-symbol texts.
    pub entropy: f64,
    /// Occurrences descending, then length descending, then first seen.
    pub repeated_substrings: Vec<RepeatedSubstring>,
    pub data_type: DataType,
}

impl AnalysisReport {
    /// Share of the text taken by the most frequent symbol.
    pub fn top_symbol_share(&self) -> f64 {
        match self.ranked_symbols.first() {
            Some(&(_, count)) if self.total_symbols > 0 => {
                count as f64 / self.total_symbols as f64
            }
            _ => 0.0,
        }
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

pub fn analyze(data: &[Symbol]) -> AnalysisReport {
    analyze_with(data, &AnalyzerConfig::default())
}

pub fn analyze_with(data: &[Symbol], config: &AnalyzerConfig) -> AnalysisReport {
    let mut frequencies: HashMap<Symbol, usize> = HashMap::new();
    for &s in data {
        *frequencies.entry(s).or_insert(0) += 1;
    }

    let mut ranked_symbols: Vec<(Symbol, usize)> =
        frequencies.iter().map(|(&s, &c)| (s, c)).collect();
    ranked_symbols.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let report = AnalysisReport {
        total_symbols: data.len(),
        longest_run: longest_run(data),
        distinct_symbols: frequencies.len(),
        entropy: shannon_entropy(&ranked_symbols, data.len()),
        repeated_substrings: repeated_substrings(data, config),
        data_type: classify(data),
        frequencies,
        ranked_symbols,
    };

    log::debug!(
        "analysis: n={} distinct={} run={} entropy={:.3} type={} patterns={}",
        report.total_symbols,
        report.distinct_symbols,
        report.longest_run,
        report.entropy,
        report.data_type,
        report.repeated_substrings.len()
    );
    report
}

//==================================================================================
// 3. Statistics
//==================================================================================

pub fn longest_run(data: &[Symbol]) -> usize {
    let mut best = 0;
    let mut current = 0;
    let mut previous: Option<Symbol> = None;
    for &s in data {
        current = if previous == Some(s) { current + 1 } else { 1 };
        best = best.max(current);
        previous = Some(s);
    }
    best
}

/// Sums in `ranked` order; the result must be bit-for-bit reproducible.
fn shannon_entropy(ranked: &[(Symbol, usize)], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let entropy: f64 = ranked
        .iter()
        .map(|&(_, count)| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();
    // A single symbol sums to -0.0.
    if entropy > 0.0 {
        entropy
    } else {
        0.0
    }
}

/// One pass per pattern length; each pass keeps substrings in first-seen
/// order, so the final stable sort leaves that as the last tie-breaker.
fn repeated_substrings(data: &[Symbol], config: &AnalyzerConfig) -> Vec<RepeatedSubstring> {
    let mut found = Vec::new();
    for len in config.min_pattern_len..=config.max_pattern_len {
        if len == 0 || len > data.len() {
            break;
        }
        let mut slots: HashMap<&[Symbol], usize> = HashMap::new();
        let mut seen: Vec<(&[Symbol], usize)> = Vec::new();
        for window in data.windows(len) {
            match slots.get(window) {
                Some(&slot) => seen[slot].1 += 1,
                None => {
                    slots.insert(window, seen.len());
                    seen.push((window, 1));
                }
            }
        }
        found.extend(
            seen.into_iter()
                .filter(|&(_, count)| count >= config.min_occurrences)
                .map(|(pattern, occurrences)| RepeatedSubstring {
                    pattern: pattern.to_vec(),
                    occurrences,
                }),
        );
    }
    found.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then(b.pattern.len().cmp(&a.pattern.len()))
    });
    found
}

/// Base64 first, then printable text, otherwise binary. The empty text is
/// vacuously Base64.
pub fn classify(data: &[Symbol]) -> DataType {
    if data.iter().all(|&s| DataType::is_base64_symbol(s)) {
        return DataType::Base64;
    }
    let printable = data.iter().filter(|&&s| DataType::is_printable(s)).count();
    if printable * TEXT_PRINTABLE_TENTHS.1 >= data.len() * TEXT_PRINTABLE_TENTHS.0 {
        DataType::Text
    } else {
        DataType::Binary
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
