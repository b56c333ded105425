use indicatif::ProgressBar;
use ndarray::{aview1, Array2};
use num_traits::Float;
use thiserror::Error;

/// Errors detected while validating a sampler configuration, before any
/// sampling work starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum McmcError {
    /// `num_samples` was zero; the chain must at least hold its seed state.
    #[error("number of samples must be positive")]
    NoSamples,

    /// Discarding `burn_in` rows would leave an empty (or negative-length)
    /// posterior sample set.
    #[error("burn-in ({burn_in}) must be smaller than the number of samples ({num_samples})")]
    BurnInTooLong { burn_in: usize, num_samples: usize },
}

pub trait MarkovChain<S> {
    /// Does one iteration of the chain, returning the new current state.
    fn step(&mut self) -> &Vec<S>;

    /// Get the current state without stepping.
    fn current_state(&self) -> &Vec<S>;
}

/// Runs a chain for `n_steps` total states and collects them into a matrix
/// with one row per state.
///
/// Row 0 is the chain's current state as-is; no acceptance test is applied
/// to the seed row. The remaining `n_steps - 1` rows each come from one
/// [`MarkovChain::step`] call, so a rejected proposal shows up as a repeated
/// row, never as a gap.
///
/// With `n_steps == 0` the chain is left untouched and the returned matrix
/// has zero rows.
pub fn run_chain<S, M>(chain: &mut M, n_steps: usize) -> Array2<S>
where
    M: MarkovChain<S>,
    S: Float,
{
    let dim = chain.current_state().len();
    let mut out = Array2::<S>::zeros((n_steps, dim));
    if n_steps == 0 {
        return out;
    }

    out.row_mut(0).assign(&aview1(chain.current_state()));
    for i in 1..n_steps {
        let state = chain.step();
        out.row_mut(i).assign(&aview1(state));
    }

    out
}

/// Same as [`run_chain`], updating `pb` once per stored state.
pub fn run_chain_with_progress<S, M>(chain: &mut M, n_steps: usize, pb: &ProgressBar) -> Array2<S>
where
    M: MarkovChain<S>,
    S: Float,
{
    let dim = chain.current_state().len();
    let mut out = Array2::<S>::zeros((n_steps, dim));
    if n_steps == 0 {
        return out;
    }

    pb.set_length(n_steps as u64);

    out.row_mut(0).assign(&aview1(chain.current_state()));
    pb.inc(1);

    for i in 1..n_steps {
        let state = chain.step();
        out.row_mut(i).assign(&aview1(state));
        pb.inc(1);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A deterministic chain that counts up by one each step, so stored rows
    /// are easy to predict.
    struct Counter {
        state: Vec<f64>,
    }

    impl MarkovChain<f64> for Counter {
        fn step(&mut self) -> &Vec<f64> {
            self.state[0] += 1.0;
            &self.state
        }

        fn current_state(&self) -> &Vec<f64> {
            &self.state
        }
    }

    #[test]
    fn run_chain_stores_seed_then_transitions() {
        let mut chain = Counter { state: vec![10.0] };
        let out = run_chain(&mut chain, 4);
        assert_eq!(out.shape(), &[4, 1]);
        assert_eq!(out.column(0).to_vec(), vec![10.0, 11.0, 12.0, 13.0]);
    }

    #[test]
    fn run_chain_zero_steps_yields_empty_matrix() {
        let mut chain = Counter { state: vec![1.0, 2.0] };
        let out = run_chain(&mut chain, 0);
        assert_eq!(out.shape(), &[0, 2]);
        assert_eq!(chain.current_state(), &vec![1.0, 2.0]);

        let pb = indicatif::ProgressBar::hidden();
        let out = run_chain_with_progress(&mut chain, 0, &pb);
        assert_eq!(out.shape(), &[0, 2]);
    }

    #[test]
    fn run_chain_single_row_is_just_the_seed() {
        let mut chain = Counter { state: vec![-2.5] };
        let out = run_chain(&mut chain, 1);
        assert_eq!(out.shape(), &[1, 1]);
        assert_eq!(out[[0, 0]], -2.5);
    }

    #[test]
    fn error_messages_name_the_offending_values() {
        let err = McmcError::BurnInTooLong {
            burn_in: 7,
            num_samples: 5,
        };
        assert_eq!(
            err.to_string(),
            "burn-in (7) must be smaller than the number of samples (5)"
        );
    }
}
