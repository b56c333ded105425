//! Summary statistics over a stored chain of samples.

use ndarray::{Array1, Array2, Axis};
use num_traits::{Float, FromPrimitive};

/// Component-wise arithmetic mean of the samples (one row per sample).
///
/// Panics if `samples` has no rows; callers get a non-empty sample set from
/// the sampler by construction.
pub fn posterior_mean<T>(samples: &Array2<T>) -> Array1<T>
where
    T: Float + FromPrimitive,
{
    samples
        .mean_axis(Axis(0))
        .expect("Expected a non-empty sample set.")
}

/// Fraction of transitions that moved the chain, measured by exact
/// comparison of consecutive rows. Rejected proposals repeat the previous
/// row, so a repeat counts as a rejection.
///
/// Returns 0.0 for chains with fewer than two rows (no transitions).
pub fn acceptance_rate<T: Float>(samples: &Array2<T>) -> f64 {
    let n = samples.nrows();
    if n < 2 {
        return 0.0;
    }
    let accepted = (1..n)
        .filter(|&i| samples.row(i) != samples.row(i - 1))
        .count();
    accepted as f64 / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn mean_is_computed_per_component() {
        let samples = arr2(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]);
        let mean = posterior_mean(&samples);
        assert_abs_diff_eq!(mean[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean[1], 20.0, epsilon = 1e-12);
    }

    #[test]
    fn acceptance_rate_counts_moves_only() {
        // Transitions: move, repeat, move => 2 of 3 accepted.
        let samples = arr2(&[[0.0, 0.0], [1.0, 1.0], [1.0, 1.0], [2.0, 1.5]]);
        assert_abs_diff_eq!(acceptance_rate(&samples), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn frozen_chain_has_zero_acceptance() {
        let samples = arr2(&[[0.5, 0.5], [0.5, 0.5], [0.5, 0.5]]);
        assert_abs_diff_eq!(acceptance_rate(&samples), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn single_row_chain_has_no_transitions() {
        let samples = arr2(&[[0.5, 0.5]]);
        assert_eq!(acceptance_rate(&samples), 0.0);
    }
}
