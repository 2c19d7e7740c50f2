//! Weighted random index sampling.
//!
//! Weights are assumed non-negative and to sum to roughly 1; that is
//! guaranteed by table validation and not re-checked per draw.
//!
//! Both paths return the smallest index `i` whose cumulative weight is
//! `>= n` (an exact tie resolves to `i`, not `i + 1`), falling back to the
//! last index when rounding leaves `n` above the final cumulative weight.
//! The running sum in [`sample`] performs the same additions in the same
//! order as [`precompute`], so the two paths agree bit-for-bit.

use crate::UniformSource;

/// Prefix sums of `weights`.
pub fn precompute(weights: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    weights
        .iter()
        .map(|w| {
            acc += w;
            acc
        })
        .collect()
}

/// Draw an index from `weights` with a linear scan (no allocation).
///
/// Use for one-off distributions; prefer [`sample_cumulative`] for tables
/// sampled many times.
pub fn sample<R: UniformSource + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    index_linear(rng.uniform(), weights)
}

/// Draw an index using precomputed cumulative weights (binary search).
pub fn sample_cumulative<R: UniformSource + ?Sized>(rng: &mut R, cumulative: &[f64]) -> usize {
    index_cumulative(rng.uniform(), cumulative)
}

/// Index selected by uniform value `n` (linear path).
pub fn index_linear(n: f64, weights: &[f64]) -> usize {
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if n <= acc {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}

/// Index selected by uniform value `n` (binary-search path).
pub fn index_cumulative(n: f64, cumulative: &[f64]) -> usize {
    let idx = cumulative.partition_point(|&c| c < n);
    idx.min(cumulative.len().saturating_sub(1))
}
