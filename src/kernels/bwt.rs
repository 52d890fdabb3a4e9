//! Burrows-Wheeler Transform over symbol texts.
//!
//! The forward pass sorts rotation start offsets (never the rotated strings
//! themselves) by prefix doubling over the cyclic text, so periodic inputs
//! cost the same O(n log^2 n) as any other. Identical rotations stay
//! distinguishable by their start offset, and the recovery index is exactly
//! the row whose rotation starts at 0.

use crate::error::StrataError;
use crate::pipeline::models::CodecId;
use crate::types::Symbol;

//==================================================================================
// 1. Forward Transform
//==================================================================================

/// Returns the last column of the sorted rotation matrix and the recovery index.
pub fn encode(data: &[Symbol]) -> (Vec<Symbol>, usize) {
    if data.is_empty() {
        return (Vec::new(), 0);
    }
    let n = data.len();
    let rotations = sorted_rotations(data);

    let mut recovery_index = 0;
    let mut last_column = Vec::with_capacity(n);
    for (row, &start) in rotations.iter().enumerate() {
        if start == 0 {
            recovery_index = row;
        }
        last_column.push(data[(start + n - 1) % n]);
    }

    (last_column, recovery_index)
}

/// Rotation start offsets in sorted order; equal rotations by ascending offset.
///
/// After the round with step `k`, `rank` orders rotations by their first `2k`
/// symbols. Once `k >= n` that prefix covers the whole rotation.
fn sorted_rotations(data: &[Symbol]) -> Vec<usize> {
    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by_key(|&i| (data[i], i));
    let (mut rank, mut classes) = assign_ranks(&order, |i| data[i]);

    let mut k = 1;
    while classes < n && k < n {
        let key = |i: usize| (rank[i], rank[(i + k) % n]);
        order.sort_unstable_by_key(|&i| (key(i), i));
        let (next, count) = assign_ranks(&order, key);
        rank = next;
        classes = count;
        k *= 2;
    }
    order
}

/// Dense ranks for positions already sorted by `key`, plus the class count.
fn assign_ranks<K: PartialEq>(order: &[usize], key: impl Fn(usize) -> K) -> (Vec<usize>, usize) {
    let mut rank = vec![0; order.len()];
    let mut current = 0;
    for pair in order.windows(2) {
        if key(pair[1]) != key(pair[0]) {
            current += 1;
        }
        rank[pair[1]] = current;
    }
    (rank, current + 1)
}

//==================================================================================
// 2. Inverse Transform
//==================================================================================

/// Rebuilds the original text from the last column and the recovery index.
pub fn decode(last_column: &[Symbol], recovery_index: usize) -> Result<Vec<Symbol>, StrataError> {
    let n = last_column.len();
    if n == 0 {
        if recovery_index != 0 {
            return Err(StrataError::malformed(
                CodecId::Bwt,
                format!("recovery index {} given for empty input", recovery_index),
            ));
        }
        return Ok(Vec::new());
    }
    if recovery_index >= n {
        return Err(StrataError::malformed(
            CodecId::Bwt,
            format!("recovery index {} out of range for length {}", recovery_index, n),
        ));
    }

    // Stable sort of (symbol, position) by symbol gives the first column; each
    // entry's position links a row to the row of its successor rotation.
    let mut links: Vec<usize> = (0..n).collect();
    links.sort_by_key(|&pos| last_column[pos]);

    let mut output = Vec::with_capacity(n);
    let mut current = recovery_index;
    for _ in 0..n {
        let next = links[current];
        output.push(last_column[next]);
        current = next;
    }
    Ok(output)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
