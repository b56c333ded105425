/*!
# Random-Walk Metropolis Sampler

This module implements a single-chain Metropolis sampler over a generic
target distribution `D` and symmetric proposal distribution `Q` (see the
[`TargetDistribution`] and [`SymmetricProposal`] traits). Because the
proposal is symmetric, the acceptance criterion needs no Hastings
correction term.

Each iteration consumes randomness in a fixed order: one proposal draw,
then one acceptance draw. Seeding the proposal (via
[`SymmetricProposal::set_seed`]) and the sampler (via
[`Metropolis::set_seed`]) therefore makes entire runs reproducible
bit for bit.

## Example

```rust
use linreg_mcmc::distributions::{GaussianRandomWalk, SymmetricProposal};
use linreg_mcmc::metropolis::Metropolis;
use linreg_mcmc::regression::{LinRegPosterior, NormalPrior, RegressionData};
use ndarray::arr1;

let target = LinRegPosterior {
    data: RegressionData { x: arr1(&[0.0, 1.0, 2.0]), y: arr1(&[1.0, 3.0, 5.0]) },
    sigma_e: 1.0,
    intercept_prior: NormalPrior { mean: 0.5, scale: 0.5 },
    slope_prior: NormalPrior { mean: 0.5, scale: 0.5 },
};
let proposal = GaussianRandomWalk::new(0.5).set_seed(42);
let mut sampler = Metropolis::new(target, proposal, &[0.5, 0.5]).set_seed(42);

// Run for 200 total states, discarding the first 50 as burn-in.
let samples = sampler.run(200, 50).unwrap();
assert_eq!(samples.shape(), &[150, 2]);
```
*/

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{s, Array2};
use num_traits::Float;
use rand::prelude::*;

use crate::core::{run_chain, run_chain_with_progress, MarkovChain, McmcError};
use crate::distributions::{SymmetricProposal, TargetDistribution};

/**
A single-chain Metropolis sampler.

The sampler holds the target and proposal distributions, the current
accepted state, and its own random number generator for the acceptance
draws. The proposal carries a separate generator for the candidate draws;
seed both for full reproducibility.

# Examples

```rust
use linreg_mcmc::distributions::GaussianRandomWalk;
use linreg_mcmc::metropolis::Metropolis;
use linreg_mcmc::regression::{LinRegPosterior, NormalPrior, RegressionData};
use ndarray::arr1;

let target = LinRegPosterior {
    data: RegressionData { x: arr1(&[1.0]), y: arr1(&[2.0]) },
    sigma_e: 1.0,
    intercept_prior: NormalPrior { mean: 0.0, scale: 1.0 },
    slope_prior: NormalPrior { mean: 0.0, scale: 1.0 },
};
let sampler = Metropolis::new(target, GaussianRandomWalk::new(0.5), &[0.0, 0.0]);
assert_eq!(sampler.current_state, vec![0.0, 0.0]);
```
*/
#[derive(Debug, Clone)]
pub struct Metropolis<T, D, Q> {
    /// The target distribution we want to sample from.
    pub target: D,

    /// The proposal distribution used to generate candidate states.
    pub proposal: Q,

    /// The current accepted state of the chain.
    pub current_state: Vec<T>,

    /// Seed of the acceptance-draw generator.
    pub seed: u64,

    /// Random number generator for the acceptance draws.
    rng: SmallRng,
}

impl<T, D, Q> Metropolis<T, D, Q>
where
    D: TargetDistribution<T>,
    Q: SymmetricProposal<T>,
    T: Float,
    rand_distr::Standard: rand_distr::Distribution<T>,
{
    /// Constructs a sampler starting at `initial_state`, seeded from entropy.
    pub fn new(target: D, proposal: Q, initial_state: &[T]) -> Self {
        let seed = thread_rng().gen::<u64>();
        Self {
            target,
            proposal,
            current_state: initial_state.to_vec(),
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Reseeds the acceptance-draw generator.
    ///
    /// The proposal keeps its own generator; reseed it through
    /// [`SymmetricProposal::set_seed`] before constructing the sampler.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Runs the chain for `num_samples` total states (the starting state
    /// plus `num_samples - 1` transitions) and returns the states after the
    /// first `burn_in`, one row per state.
    ///
    /// The configuration is validated before any sampling work starts:
    /// `num_samples` must be positive and `burn_in` strictly smaller than
    /// `num_samples`.
    pub fn run(&mut self, num_samples: usize, burn_in: usize) -> Result<Array2<T>, McmcError> {
        Self::validate(num_samples, burn_in)?;
        let chain = run_chain(self, num_samples);
        Ok(chain.slice(s![burn_in.., ..]).to_owned())
    }

    /// Same as [`Metropolis::run`], rendering a progress bar while sampling.
    pub fn run_progress(
        &mut self,
        num_samples: usize,
        burn_in: usize,
    ) -> Result<Array2<T>, McmcError> {
        Self::validate(num_samples, burn_in)?;
        let pb = ProgressBar::new(num_samples as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        let chain = run_chain_with_progress(self, num_samples, &pb);
        pb.finish_with_message("Done!");
        Ok(chain.slice(s![burn_in.., ..]).to_owned())
    }

    fn validate(num_samples: usize, burn_in: usize) -> Result<(), McmcError> {
        if num_samples == 0 {
            return Err(McmcError::NoSamples);
        }
        if burn_in >= num_samples {
            return Err(McmcError::BurnInTooLong {
                burn_in,
                num_samples,
            });
        }
        Ok(())
    }
}

impl<T, D, Q> MarkovChain<T> for Metropolis<T, D, Q>
where
    D: TargetDistribution<T>,
    Q: SymmetricProposal<T>,
    T: Float,
    rand_distr::Standard: rand_distr::Distribution<T>,
{
    /**
    Performs one Metropolis update step.

    A candidate is drawn from the proposal, and the acceptance probability
    is computed in log space as

    \[
    \alpha = \exp\left[\log p(\text{candidate}) - \log p(\text{current})\right].
    \]

    A uniform draw `u` from [0, 1) decides the move: the candidate is
    accepted iff `u < alpha`. Two edge cases are folded into that single
    comparison:

    - `alpha` can legitimately exceed 1.0 for uphill moves; `u` is always
      below 1, so those are accepted unconditionally. No clamping.
    - If both log-densities are negative infinity the difference is NaN,
      and `u < NaN` is false, so an impossible candidate can never be
      silently accepted.

    Candidates containing non-finite coordinates are assigned log-density
    negative infinity before evaluation, making them unconditional
    rejections as well. A rejection keeps (and returns) the current state.
    */
    fn step(&mut self) -> &Vec<T> {
        let candidate = self.proposal.sample(&self.current_state);
        let candidate_lp = if candidate.iter().all(|v| v.is_finite()) {
            self.target.unnorm_log_prob(&candidate)
        } else {
            T::neg_infinity()
        };
        let current_lp = self.target.unnorm_log_prob(&self.current_state);
        let accept_prob = (candidate_lp - current_lp).exp();
        let u: T = self.rng.gen();
        if u < accept_prob {
            self.current_state = candidate;
        }
        &self.current_state
    }

    fn current_state(&self) -> &Vec<T> {
        &self.current_state
    }
}
