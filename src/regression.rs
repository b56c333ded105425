/*!
The univariate linear-regression model whose posterior the sampler explores:
a fixed observed dataset, independent Normal priors on the intercept and
slope, and a Gaussian likelihood with known noise scale.

The reference scenario (used by the demo binary and the integration tests)
is captured in the `REF_*` constants: 500 observations of x uniform in
[0, 10), y generated with intercept 0.75, slope 2.0 and noise scale 3.0,
Normal(0.5, 0.5) priors on both parameters.
*/

use ndarray::Array1;
use num_traits::Float;
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::distributions::{normal_log_pdf, TargetDistribution};

/// Observation noise scale of the reference scenario.
pub const REF_SIGMA_E: f64 = 3.0;
/// Prior mean shared by both parameters in the reference scenario.
pub const REF_PRIOR_MEAN: f64 = 0.5;
/// Prior scale shared by both parameters in the reference scenario.
pub const REF_PRIOR_SCALE: f64 = 0.5;
/// Proposal step size of the reference scenario.
pub const REF_STEP_SIZE: f64 = 0.5;
/// Chain length of the reference scenario.
pub const REF_NUM_SAMPLES: usize = 50_000;
/// Burn-in of the reference scenario.
pub const REF_BURN_IN: usize = 10_000;

/// A fixed set of (x, y) observations. Read-only once constructed; the
/// sampler never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionData<T> {
    pub x: Array1<T>,
    pub y: Array1<T>,
}

impl<T> RegressionData<T>
where
    T: Float + rand::distributions::uniform::SampleUniform,
    StandardNormal: Distribution<T>,
{
    /// Generates `n` synthetic observations from the line
    /// `y = intercept + slope * x + Normal(0, sigma_e)`, with x drawn
    /// uniformly from [0, 10).
    ///
    /// The generator handle is passed in so data generation draws from the
    /// same explicit stream discipline as the sampler.
    pub fn synthetic<R: Rng>(n: usize, intercept: T, slope: T, sigma_e: T, rng: &mut R) -> Self {
        let x_dist = Uniform::new(T::zero(), T::from(10.0).unwrap());
        let noise = Normal::new(T::zero(), sigma_e)
            .expect("Expecting creation of normal distribution to succeed.");

        let x: Array1<T> = (0..n).map(|_| x_dist.sample(rng)).collect();
        let y: Array1<T> = x
            .iter()
            .map(|&xi| intercept + slope * xi + noise.sample(rng))
            .collect();
        Self { x, y }
    }
}

impl<T> RegressionData<T> {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// An independent univariate Normal prior for one regression parameter.
///
/// Kept as a named piece of configuration so priors can be swapped without
/// touching the sampler or the likelihood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalPrior<T> {
    pub mean: T,
    pub scale: T,
}

impl<T: Float> NormalPrior<T> {
    /// Log-density of the prior at `value`.
    pub fn log_pdf(&self, value: T) -> T {
        normal_log_pdf(value, self.mean, self.scale)
    }
}

/**
The unnormalized log-posterior of the two-parameter linear regression:
`log p(intercept) + log p(slope) + sum_i log N(y_i | intercept + slope * x_i, sigma_e)`.

Evaluation stays in log space throughout; the likelihood sum over all
observations is never exponentiated.

# Examples

```rust
use linreg_mcmc::distributions::TargetDistribution;
use linreg_mcmc::regression::{LinRegPosterior, NormalPrior, RegressionData};
use ndarray::arr1;

let posterior: LinRegPosterior<f64> = LinRegPosterior {
    data: RegressionData { x: arr1(&[0.0, 1.0]), y: arr1(&[1.0, 3.0]) },
    sigma_e: 1.0,
    intercept_prior: NormalPrior { mean: 0.0, scale: 1.0 },
    slope_prior: NormalPrior { mean: 0.0, scale: 1.0 },
};
assert!(posterior.unnorm_log_prob(&[1.0, 2.0]).is_finite());
```
*/
#[derive(Debug, Clone, PartialEq)]
pub struct LinRegPosterior<T> {
    pub data: RegressionData<T>,
    /// Known observation noise scale (not inferred).
    pub sigma_e: T,
    pub intercept_prior: NormalPrior<T>,
    pub slope_prior: NormalPrior<T>,
}

impl<T: Float> TargetDistribution<T> for LinRegPosterior<T> {
    fn unnorm_log_prob(&self, theta: &[T]) -> T {
        let (intercept, slope) = (theta[0], theta[1]);
        let log_prior = self.intercept_prior.log_pdf(intercept) + self.slope_prior.log_pdf(slope);
        let log_likelihood = self
            .data
            .x
            .iter()
            .zip(self.data.y.iter())
            .fold(T::zero(), |acc, (&xi, &yi)| {
                acc + normal_log_pdf(yi, intercept + slope * xi, self.sigma_e)
            });
        log_prior + log_likelihood
    }
}
