//! Bayesian linear regression demo: generates noisy synthetic data, runs the
//! random-walk Metropolis sampler on the two-parameter posterior, reports the
//! posterior mean estimates, and plots histograms of the posterior samples.

use linreg_mcmc::distributions::{GaussianRandomWalk, SymmetricProposal};
use linreg_mcmc::metropolis::Metropolis;
use linreg_mcmc::regression::{
    LinRegPosterior, NormalPrior, RegressionData, REF_BURN_IN, REF_NUM_SAMPLES, REF_PRIOR_MEAN,
    REF_PRIOR_SCALE, REF_SIGMA_E, REF_STEP_SIZE,
};
use linreg_mcmc::stats::{acceptance_rate, posterior_mean};

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, PathElement, Rectangle};
use plotters::style::{Color, BLACK, RED, WHITE};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::error::Error;

/// Main entry point: reproduces the reference scenario end to end and saves
/// posterior histograms to `posterior.png`.
fn main() -> Result<(), Box<dyn Error>> {
    const N_OBS: usize = 500;
    const TRUE_INTERCEPT: f64 = 0.75;
    const TRUE_SLOPE: f64 = 2.0;
    const SEED: u64 = 42;

    // Synthetic dataset: x uniform in [0, 10), y on the true line plus noise.
    let mut data_rng = SmallRng::seed_from_u64(SEED);
    let data = RegressionData::synthetic(N_OBS, TRUE_INTERCEPT, TRUE_SLOPE, REF_SIGMA_E, &mut data_rng);

    let target = LinRegPosterior {
        data,
        sigma_e: REF_SIGMA_E,
        intercept_prior: NormalPrior {
            mean: REF_PRIOR_MEAN,
            scale: REF_PRIOR_SCALE,
        },
        slope_prior: NormalPrior {
            mean: REF_PRIOR_MEAN,
            scale: REF_PRIOR_SCALE,
        },
    };
    let proposal = GaussianRandomWalk::new(REF_STEP_SIZE).set_seed(SEED);
    let mut sampler = Metropolis::new(target, proposal, &[0.5, 0.5]).set_seed(SEED);

    let samples = sampler.run_progress(REF_NUM_SAMPLES, REF_BURN_IN)?;
    println!("Kept {} posterior samples", samples.nrows());

    let mean = posterior_mean(&samples);
    println!("Posterior mean estimates:");
    println!("  intercept: {:.4}  (true {TRUE_INTERCEPT})", mean[0]);
    println!("  slope:     {:.4}  (true {TRUE_SLOPE})", mean[1]);
    println!("Acceptance rate: {:.3}", acceptance_rate(&samples));

    // Histograms of the two marginals, side by side.
    let root = BitMapBackend::new("posterior.png", (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    draw_histogram(
        &panels[0],
        "Posterior - Intercept",
        samples.column(0),
        mean[0],
    )?;
    draw_histogram(&panels[1], "Posterior - Slope", samples.column(1), mean[1])?;
    root.present()?;
    println!("Saved posterior histograms to posterior.png");

    Ok(())
}

/// Draws a 20-bin histogram of `values` with a vertical line at `mean`.
fn draw_histogram(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    values: ArrayView1<f64>,
    mean: f64,
) -> Result<(), Box<dyn Error>> {
    const N_BINS: usize = 20;

    let min = *values.min()?;
    let max = *values.max()?;
    let width = (max - min) / N_BINS as f64;

    let mut counts = vec![0u32; N_BINS];
    for &v in values.iter() {
        let bin = (((v - min) / width) as usize).min(N_BINS - 1);
        counts[bin] += 1;
    }
    let tallest = *counts.iter().max().unwrap();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(min..max, 0u32..tallest + tallest / 10)?;

    chart
        .configure_mesh()
        .x_labels(10)
        .y_labels(8)
        .bold_line_style(BLACK.mix(0.2))
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = min + i as f64 * width;
        let x1 = x0 + width;
        Rectangle::new(
            [(x0, 0), (x1, count)],
            plotters::style::RGBColor(135, 206, 235).filled(),
        )
    }))?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(mean, 0), (mean, tallest)],
            RED.stroke_width(2),
        )))?
        .label("Mean")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.9))
        .draw()?;

    Ok(())
}

#[test]
fn test_main() {
    main().expect("Expected main to not return an error.");
    assert!(
        std::path::Path::new("posterior.png").exists(),
        "Expected posterior.png to exist."
    );
}
